mod split_layout;
mod tab_session;

mod store_sessions;
mod workbench_flow;

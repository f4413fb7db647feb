use super::*;

mod abort;
mod assertions;
mod dom_api;
mod event_dispatch;
mod listeners;
mod query_api;
mod timers;
mod trace_config;
mod user_actions;

// User actions and timers can nest arbitrarily deep through handlers.
const STACK_RED_ZONE: usize = 32 * 1024 * 1024;

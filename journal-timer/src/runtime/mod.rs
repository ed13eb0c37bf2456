mod action_queue;
mod actions;
mod event_loop;
mod views;
mod wait;

pub use event_loop::run_app;

pub mod input;
pub mod run_loop;
pub mod watch;

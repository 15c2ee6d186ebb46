pub mod backoff;
pub mod capture_loop;
pub mod runner;
pub mod session;
pub mod signal;

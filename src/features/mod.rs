pub mod deliver;

pub use deliver::{OutputMode, Reporter, deliver, submission_timeout};

mod state;

pub use state::AsyncFrom;
pub use state::Response;

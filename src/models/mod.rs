pub mod requests;
pub mod responses;

pub use requests::DrawRequest;
pub use responses::{DrawResponse, ErrorResponse, GameStatusResponse, PairsResponse};

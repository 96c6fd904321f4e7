use rocket::{http::Status, response::status::Custom, response::Responder};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = match &self {
            Self::BadRequest(_) => Status::BadRequest,
        };
        // Plain-text body so the caller sees what was wrong with the request.
        Custom(status, self.to_string()).respond_to(req)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Input file not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    RenderFailure(String),
}

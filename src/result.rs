use thiserror::Error;

pub type Result<A, E = Error> = std::result::Result<A, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected end of input at byte {position}")]
    EndOfInput { position: usize },
    #[error("invalid UTF-8 at byte {position}")]
    InvalidUtf8 { position: usize },
    #[error("invalid value: {detail}")]
    InvalidValue { detail: String },
    #[error("invalid variant discriminator {discriminator} at byte {position}")]
    InvalidVariant { discriminator: String, position: usize },
    #[error("unsupported schema feature: {0}")]
    NotImplemented(&'static str),
    #[error("{encoding} varint out of range: {detail}")]
    VarintRange { encoding: &'static str, detail: String },
    #[error("{operation} requires byte alignment")]
    Unaligned { operation: &'static str },
    #[error("field `{path}`: {source}")]
    Field { path: String, source: Box<Error> },
}

impl Error {
    pub fn invalid_value(detail: impl Into<String>) -> Self {
        Error::InvalidValue { detail: detail.into() }
    }

    /// Attach a field path to this error, nesting it if one is already present.
    pub fn at_field(self, name: impl Into<String>) -> Self {
        match self {
            Error::Field { path, source } => Error::Field {
                path: format!("{}.{}", name.into(), path),
                source,
            },
            other => Error::Field {
                path: name.into(),
                source: Box::new(other),
            },
        }
    }
}

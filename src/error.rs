use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An operation's shape precondition does not hold.
    #[error("shape error: {0}")]
    Shape(String),

    /// A multi-index has the wrong arity or a coordinate out of bounds.
    #[error("index error: {0}")]
    Index(String),

    /// A model hyperparameter is outside its allowed range.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        param: String,
        value: String,
        constraint: String,
    },
}

impl Error {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        Error::Shape(msg.into())
    }

    pub(crate) fn index(msg: impl Into<String>) -> Self {
        Error::Index(msg.into())
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Error::Shape(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Error::Index(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

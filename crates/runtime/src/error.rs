use std::fmt;

/// Rejected [`crate::AtlasOptions`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    ZeroPanels,
    NonPositiveWidth(f64),
    NonPositiveRatio(f64),
    NonFiniteCenter,
    NonFiniteZoom(f64),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::ZeroPanels => write!(f, "panel count must be at least 1"),
            OptionsError::NonPositiveWidth(w) => {
                write!(f, "face width must be a positive number of pixels, got {w}")
            }
            OptionsError::NonPositiveRatio(r) => {
                write!(f, "height ratio must be positive, got {r}")
            }
            OptionsError::NonFiniteCenter => write!(f, "map center must be finite"),
            OptionsError::NonFiniteZoom(z) => write!(f, "zoom level must be finite, got {z}"),
        }
    }
}

impl std::error::Error for OptionsError {}

#[derive(Debug)]
pub enum AtlasError {
    InvalidOptions(OptionsError),
    Config(serde_json::Error),
    /// The host could not create a visual element.
    Element(String),
    /// The mapping service could not create a viewport.
    Viewport(String),
    AlreadyInserted,
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::InvalidOptions(err) => write!(f, "invalid atlas options: {err}"),
            AtlasError::Config(err) => write!(f, "atlas config parse error: {err}"),
            AtlasError::Element(msg) => write!(f, "failed to create element: {msg}"),
            AtlasError::Viewport(msg) => write!(f, "failed to create map viewport: {msg}"),
            AtlasError::AlreadyInserted => write!(f, "atlas is already inserted"),
        }
    }
}

impl std::error::Error for AtlasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtlasError::InvalidOptions(err) => Some(err),
            AtlasError::Config(err) => Some(err),
            AtlasError::Element(_) | AtlasError::Viewport(_) | AtlasError::AlreadyInserted => None,
        }
    }
}

impl From<OptionsError> for AtlasError {
    fn from(err: OptionsError) -> Self {
        AtlasError::InvalidOptions(err)
    }
}

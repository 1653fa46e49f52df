pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid options: {message}")]
    Config { message: String },

    #[error("XML parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    #[error("expected an <svg> root element, found {}", describe_first_element(.element))]
    MissingRoot { element: Option<String> },

    #[error("<{element}>: {message}")]
    Geometry { element: String, message: String },

    #[error("<{element}>: {source}")]
    PathData {
        element: String,
        #[source]
        source: svgfit_path::Error,
    },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub(crate) fn geometry(element: &str, message: impl Into<String>) -> Self {
        Self::Geometry {
            element: element.to_string(),
            message: message.into(),
        }
    }
}

fn describe_first_element(element: &Option<String>) -> String {
    match element {
        Some(name) => format!("<{name}>"),
        None => "no elements".to_string(),
    }
}

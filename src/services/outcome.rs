/// Result of a service call, before it is mapped to a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    /// Success with nothing to return: an empty list or an unset field.
    NoContent,
    NotFound,
    Forbidden(String),
}

impl<T> Outcome<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome::Ok(value),
            None => Outcome::NotFound,
        }
    }
}

impl<T> Outcome<Vec<T>> {
    /// `NoContent` for an empty list, `Ok` otherwise.
    pub fn from_list(items: Vec<T>) -> Self {
        if items.is_empty() {
            Outcome::NoContent
        } else {
            Outcome::Ok(items)
        }
    }
}

impl<T> Outcome<T> {
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::NoContent => Outcome::NoContent,
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Forbidden(reason) => Outcome::Forbidden(reason),
        }
    }
}

use thiserror::Error;

/// Errors raised while turning raw input into calculator commands.
///
/// The engine itself never fails; these only occur at the input boundary,
/// before a command reaches it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A digit outside `0..=9`.
    #[error("invalid digit {0}: expected a value in 0..=9")]
    InvalidDigit(u8),

    /// Text that names no keypad button or alias.
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

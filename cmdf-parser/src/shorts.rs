use core::str::Chars;

/// The body of a short option token (the part after the `-`), statically
/// guaranteed to contain at least one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Shorts<'arg>(&'arg str);

impl<'arg> Shorts<'arg> {
    #[inline]
    pub fn new(body: &'arg str) -> Option<Self> {
        match body.is_empty() {
            true => None,
            false => Some(Self(body)),
        }
    }

    /// The option characters, left to right
    #[inline]
    pub fn chars(&self) -> Chars<'arg> {
        self.0.chars()
    }

    /// True if more than one option is packed into this token, as in `-vWf`
    #[inline]
    pub fn is_bundle(&self) -> bool {
        let mut chars = self.0.chars();
        chars.next();
        chars.next().is_some()
    }

    #[inline(always)]
    pub fn as_str(&self) -> &'arg str {
        self.0
    }
}

use std::str::FromStr;
use std::str::Utf8Error;

use thiserror::Error;

/// Consumes the slice until a non-ascii whitespace character is reached.
pub fn take_ws(bytes: &[u8]) -> &[u8] {
    let i = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    &bytes[i..]
}

/// Takes the next character from the slice. If none is found, the slice is left as-is.
pub const fn take_1(bytes: &[u8]) -> (Option<u8>, &[u8]) {
    let [b, bytes @ ..] = bytes else {
        return (None, bytes);
    };

    (Some(*b), bytes)
}

/// Like `take_1`, but doesn't consume the token
pub fn peek_1(bytes: &[u8]) -> Option<u8> {
    let [b, _bytes @ ..] = bytes else { return None };

    Some(*b)
}

/// Advance the slice until `P` is satisfied, without consuming the byte that satisfied it. If `P`
/// is never satisfied, the whole slice is taken.
///
/// Returns `None` when nothing was consumed.
#[inline]
pub fn take_until_fn<P>(p: P, bytes: &[u8]) -> (Option<&[u8]>, &[u8])
where
    P: Fn(u8) -> bool,
{
    let i = bytes.iter().position(|&b| p(b)).unwrap_or(bytes.len());

    if i == 0 {
        (None, bytes)
    } else {
        let (res, bytes) = bytes.split_at(i);

        (Some(res), bytes)
    }
}

/// Takes a run of ascii digits from the front of the slice.
pub fn take_digits(bytes: &[u8]) -> (Option<&[u8]>, &[u8]) {
    take_until_fn(|b| !b.is_ascii_digit(), bytes)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Error parsing bytes from UTF-8: {0}")]
    InvalidUTF8(Utf8Error),

    #[error("Failed to convert \"{str}\"")]
    ParseError { str: String },
}

/// Converts `&[u8]` to `T` if `T: FromStr`.
pub fn convert<T: FromStr>(bytes: &[u8]) -> Result<T, ConvertError> {
    let str = std::str::from_utf8(bytes).map_err(ConvertError::InvalidUTF8)?;

    let Ok(res) = str.parse::<T>() else {
        return Err(ConvertError::ParseError {
            str: str.to_string(),
        });
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_take_ws_full_ws() {
        let bytes = b"  ";

        let res = super::take_ws(bytes);

        assert_eq!(res, b"")
    }

    #[test]
    fn test_take_ws_stops_at_token() {
        let res = super::take_ws(b" \r\n 3o");

        assert_eq!(res, b"3o")
    }

    #[test]
    fn test_take_digits_to_end_of_input() {
        let (digits, rest) = super::take_digits(b"123");

        assert_eq!(digits, Some(b"123".as_slice()));
        assert_eq!(rest, b"");
    }

    #[test]
    fn test_take_digits_none() {
        let (digits, rest) = super::take_digits(b"o2b");

        assert_eq!(digits, None);
        assert_eq!(rest, b"o2b");
    }

    #[test]
    fn test_convert_overflow() {
        let res = super::convert::<u8>(b"300");

        assert_eq!(
            res,
            Err(super::ConvertError::ParseError {
                str: "300".to_string()
            })
        );
    }
}

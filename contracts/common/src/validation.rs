//! Input validators shared by the MedHelp contracts.
//!
//! Every externally supplied string is bounds-checked and restricted to
//! printable ASCII before it reaches business logic. Soroban `String` only
//! exposes byte copies, so each validator copies into a fixed buffer sized
//! to the field's maximum length.

use soroban_sdk::String;

const MIN_NAME_LEN: u32 = 2;
const MAX_NAME_LEN: u32 = 64;

const MIN_EMAIL_LEN: u32 = 5;
const MAX_EMAIL_LEN: u32 = 120;

// Content identifiers: IPFS CIDs, hex digests and the like.
const MIN_HASH_LEN: u32 = 32;
const MAX_HASH_LEN: u32 = 64;

const MAX_PHONE_LEN: u32 = 20;
const MAX_TEXT_LEN: u32 = 1000;

fn printable_ascii(buf: &[u8]) -> bool {
    buf.iter().all(|b| (32..=126).contains(b))
}

/// A display name: 2–64 printable-ASCII bytes.
pub fn is_valid_name(name: &String) -> bool {
    let len = name.len();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return false;
    }
    let mut buf = [0u8; MAX_NAME_LEN as usize];
    name.copy_into_slice(&mut buf[..len as usize]);
    printable_ascii(&buf[..len as usize])
}

/// An email address: bounded printable ASCII containing exactly one `@`
/// with at least one byte on each side. Full RFC validation is the
/// off-chain registrar's problem; this guards the storage namespace.
pub fn is_valid_email(email: &String) -> bool {
    let len = email.len();
    if !(MIN_EMAIL_LEN..=MAX_EMAIL_LEN).contains(&len) {
        return false;
    }
    let mut buf = [0u8; MAX_EMAIL_LEN as usize];
    email.copy_into_slice(&mut buf[..len as usize]);
    let bytes = &buf[..len as usize];
    if !printable_ascii(bytes) || bytes.iter().any(|b| *b == b' ') {
        return false;
    }
    let at_count = bytes.iter().filter(|b| **b == b'@').count();
    if at_count != 1 {
        return false;
    }
    let at = bytes.iter().position(|b| *b == b'@').unwrap_or(0);
    at >= 1 && at + 1 < bytes.len()
}

/// A content identifier (CID / digest): 32–64 bytes of `[A-Za-z0-9_-]`.
pub fn is_valid_content_hash(hash: &String) -> bool {
    let len = hash.len();
    if !(MIN_HASH_LEN..=MAX_HASH_LEN).contains(&len) {
        return false;
    }
    let mut buf = [0u8; MAX_HASH_LEN as usize];
    hash.copy_into_slice(&mut buf[..len as usize]);
    buf[..len as usize]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
}

/// A phone number: up to 20 bytes of digits, `+`, `-`, or spaces. Empty is
/// rejected; the field itself is optional at the call sites.
pub fn is_valid_phone(phone: &String) -> bool {
    let len = phone.len();
    if len == 0 || len > MAX_PHONE_LEN {
        return false;
    }
    let mut buf = [0u8; MAX_PHONE_LEN as usize];
    phone.copy_into_slice(&mut buf[..len as usize]);
    buf[..len as usize]
        .iter()
        .all(|b| b.is_ascii_digit() || matches!(*b, b'+' | b'-' | b' '))
}

/// Free-text fields (medication lines, street addresses): non-empty
/// printable ASCII up to 1000 bytes.
pub fn is_valid_text(text: &String) -> bool {
    let len = text.len();
    if len == 0 || len > MAX_TEXT_LEN {
        return false;
    }
    let mut buf = [0u8; MAX_TEXT_LEN as usize];
    text.copy_into_slice(&mut buf[..len as usize]);
    printable_ascii(&buf[..len as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    fn s(env: &Env, v: &str) -> String {
        String::from_str(env, v)
    }

    #[test]
    fn name_bounds() {
        let env = Env::default();
        assert!(is_valid_name(&s(&env, "Alice Mensah")));
        assert!(!is_valid_name(&s(&env, "A")));
        assert!(!is_valid_name(&s(&env, core::str::from_utf8(&[b'x'; 65]).unwrap())));
    }

    #[test]
    fn email_shape() {
        let env = Env::default();
        assert!(is_valid_email(&s(&env, "alice@medhelp.example")));
        assert!(!is_valid_email(&s(&env, "alice")));
        assert!(!is_valid_email(&s(&env, "@medhelp.example")));
        assert!(!is_valid_email(&s(&env, "alice@")));
        assert!(!is_valid_email(&s(&env, "a@b@c.example")));
        assert!(!is_valid_email(&s(&env, "alice @medhelp.example")));
    }

    #[test]
    fn content_hash_charset() {
        let env = Env::default();
        assert!(is_valid_content_hash(&s(
            &env,
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        )));
        assert!(!is_valid_content_hash(&s(&env, "tooshort")));
        assert!(!is_valid_content_hash(&s(
            &env,
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbd!"
        )));
    }

    #[test]
    fn phone_and_text() {
        let env = Env::default();
        assert!(is_valid_phone(&s(&env, "+233 24-555-0101")));
        assert!(!is_valid_phone(&s(&env, "call me maybe")));
        assert!(is_valid_text(&s(&env, "Amoxicillin 500mg, 3x daily, 7 days")));
        assert!(!is_valid_text(&s(&env, "")));
    }
}

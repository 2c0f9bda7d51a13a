// Stored bcrypt strings come in two lengths: 59 bytes for the old format with a
// bare "2" version, 60 bytes for the new format with a letter after the "2".
const OLD_FORMAT_LEN: usize = 59;
const NEW_FORMAT_LEN: usize = 60;

/// Field offsets within a stored hash string, derived from the version width.
#[derive(Clone, Copy, Debug)]
pub struct HashFormat {
    pub version_len: usize,
    pub work_factor_offset: usize,
    pub setting_len: usize,
    pub hash_offset: usize,
}

impl HashFormat {
    fn for_version_len(version_len: usize) -> Self {
        // One byte for the leading '$', the version itself, one byte for the '$'
        // in front of the cost digits.
        let work_factor_offset = 1 + version_len + 1;
        let setting_len = work_factor_offset + 2;

        Self {
            version_len,
            work_factor_offset,
            setting_len,
            hash_offset: setting_len + 1,
        }
    }
}

/// Runs every format check over `hash` and picks the matching field layout,
/// or `None` the moment any check fails.
///
/// Accepted strings are pure ASCII (every position is held to an ASCII class),
/// so the offsets in the returned layout are exact byte indexes.
pub fn scan(hash: &str) -> Option<HashFormat> {
    enum ScanStates {
        PrefixDollar,
        PrefixTwo,
        Version,
        CostDelimiter,
        CostTens,
        CostOnes,
        PayloadDelimiter,
        Payload,
    }

    if hash.len() != OLD_FORMAT_LEN && hash.len() != NEW_FORMAT_LEN {
        return None;
    }

    let mut state = ScanStates::PrefixDollar;
    let mut format = None;

    for byte in hash.bytes() {
        state = match state {
            ScanStates::PrefixDollar => match byte {
                b'$' => ScanStates::PrefixTwo,
                _ => return None,
            },

            ScanStates::PrefixTwo => match byte {
                b'2' => ScanStates::Version,
                _ => return None,
            },

            ScanStates::Version => match byte {
                b'a' | b'b' | b'x' | b'y' => {
                    format = Some(HashFormat::for_version_len(2));
                    ScanStates::CostDelimiter
                }

                // No letter means the old one-character version, in which case
                // this byte must already be the '$' in front of the cost digits.
                // An unrecognized letter takes the same path and fails here.
                b'$' => {
                    format = Some(HashFormat::for_version_len(1));
                    ScanStates::CostTens
                }

                _ => return None,
            },

            ScanStates::CostDelimiter => match byte {
                b'$' => ScanStates::CostTens,
                _ => return None,
            },

            ScanStates::CostTens => {
                if !byte.is_ascii_digit() {
                    return None;
                }

                ScanStates::CostOnes
            }

            ScanStates::CostOnes => {
                if !byte.is_ascii_digit() {
                    return None;
                }

                ScanStates::PayloadDelimiter
            }

            ScanStates::PayloadDelimiter => match byte {
                b'$' => ScanStates::Payload,
                _ => return None,
            },

            ScanStates::Payload => {
                if !is_bcrypt_base64_byte(byte) {
                    return None;
                }

                ScanStates::Payload
            }
        };
    }

    format
}

fn is_bcrypt_base64_byte(byte: u8) -> bool {
    matches!(byte, b'.' | b'/' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z')
}

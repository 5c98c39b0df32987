use super::error::ManoError;

pub struct ManoReader<'a> {
    payload: &'a [u8],
}

impl<'a> ManoReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ManoError> {
        if self.payload.len() < needed {
            return Err(ManoError::TooSmall {
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u32_le(&self, range: std::ops::Range<usize>) -> Result<u32, ManoError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 4 {
            return Err(ManoError::TooSmall {
                actual: self.payload.len(),
            });
        }
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_f64_le(&self, offset: usize) -> Result<f64, ManoError> {
        let bytes = self.read_slice(offset..offset + 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(raw))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], ManoError> {
        self.payload.get(range).ok_or(ManoError::TooSmall {
            actual: self.payload.len(),
        })
    }

    /// Decode a byte range as UTF-8, substituting replacement characters for
    /// invalid sequences. Text validity is not load-bearing downstream, so a
    /// bad label never fails the decode.
    pub fn read_lossy_string(&self, range: std::ops::Range<usize>) -> Result<String, ManoError> {
        let bytes = self.read_slice(range)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

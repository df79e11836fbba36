#![deny(unsafe_code)]

use sha2::{Digest, Sha256};

/// Running SHA-256 over the dataset tables, fed in manifest order.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one table; the path is hashed too so renaming a table changes the fingerprint.
    pub fn add_table(&mut self, path: &str, contents: &str) {
        self.hasher.update(path.as_bytes());
        self.hasher.update([0u8]);
        self.hasher.update(contents.as_bytes());
        self.hasher.update([0u8]);
    }

    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fingerprint_is_sha256_of_nothing() {
        assert_eq!(
            Fingerprint::new().finish(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn fingerprint_depends_on_path_and_content() {
        let mut a = Fingerprint::new();
        a.add_table("icf/codes.csv", "code\n");
        let mut b = Fingerprint::new();
        b.add_table("icf/other.csv", "code\n");
        assert_ne!(a.finish(), b.finish());
    }
}

use sha3::{Digest, Sha3_256};

/// State that is handed out to clients or written to disk and has to come
/// back unmodified.
pub trait ProtectedState {
    fn compute_seal_info(&self) -> String;

    fn seal(&self) -> String {
        seal(self.compute_seal_info())
    }

    fn verify_seal(&self, seal: &str) -> bool {
        verify(self.compute_seal_info(), seal)
    }
}

pub fn seal(s: String) -> String {
    let payload = format!("truthtable result, altering it invalidates the verdict|{}", s);
    let mut hasher = Sha3_256::new();
    hasher.update(payload);
    let res = hasher.finalize();
    let mut s = String::new();
    for b in res {
        s.push_str(&format!("{:02x}", b));
    }
    s.to_uppercase()
}

pub fn verify(s: String, hash: &str) -> bool {
    seal(s) == hash.to_uppercase()
}

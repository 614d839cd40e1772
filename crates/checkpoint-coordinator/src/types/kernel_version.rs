/// Storage-format tag recorded in every checkpoint record so recovery can
/// detect a format change across the checkpoint boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct KernelVersion(u16);

impl KernelVersion {
    pub fn new(version: u16) -> Self {
        Self(version)
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse readiness checklist shown above every other panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    pub connection_verified: bool,
    pub files_loaded: bool,
    pub items_loaded: bool,
    pub items_selected: bool,
}

impl Readiness {
    pub fn checks(&self) -> [(&'static str, bool); 4] {
        [
            ("API connected", self.connection_verified),
            ("JSON files loaded", self.files_loaded),
            ("Items loaded", self.items_loaded),
            ("Items selected", self.items_selected),
        ]
    }
}

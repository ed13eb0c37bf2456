/// Ordered `name -> pin` pairs in the order they appear in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameMapping {
    entries: Vec<(String, String)>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing name keeps its position. Blank names are dropped.
    pub fn insert(&mut self, name: impl Into<String>, pin: impl Into<String>) {
        let name = name.into();
        if name.trim().is_empty() {
            return;
        }
        let pin = pin.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = pin,
            None => self.entries.push((name, pin)),
        }
    }

    pub fn pin(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, pin)| pin.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, P)> for NameMapping {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (name, pin) in iter {
            mapping.insert(name, pin);
        }
        mapping
    }
}

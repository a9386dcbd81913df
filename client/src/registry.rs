use crate::surface::MarkerHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    City,
    Property,
}

/// Index of a marker in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(usize);

#[derive(Debug, Clone)]
pub struct MarkerEntry<H> {
    pub handle: H,
    /// Zoom level the map must exceed for this marker to be attached.
    pub threshold: f64,
    pub kind: MarkerKind,
}

/// Every marker the controller placed, in placement order.
#[derive(Debug)]
pub struct MarkerRegistry<H> {
    entries: Vec<MarkerEntry<H>>,
}

impl<H> Default for MarkerRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: MarkerHandle> MarkerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: H, threshold: f64, kind: MarkerKind) -> MarkerId {
        let id = MarkerId(self.entries.len());
        self.entries.push(MarkerEntry {
            handle,
            threshold,
            kind,
        });
        id
    }

    pub fn get(&self, id: MarkerId) -> Option<&MarkerEntry<H>> {
        self.entries.get(id.0)
    }

    pub fn all(&self) -> impl Iterator<Item = &MarkerEntry<H>> {
        self.entries.iter()
    }

    pub fn count(&self, kind: MarkerKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }
}

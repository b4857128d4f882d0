use super::sample::GeodeticSample;

/// Append-only sequence of samples in acquisition order.
///
/// There is no capacity bound: a run lasts as long as the operator keeps it
/// going and the whole sequence is needed for the tour and path exports.
#[derive(Debug, Default, Clone)]
pub struct Track {
    samples: Vec<GeodeticSample>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sample: GeodeticSample) {
        self.samples.push(sample);
    }

    /// Every sample appended so far, oldest first.
    pub fn snapshot(&self) -> &[GeodeticSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

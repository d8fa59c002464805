use rand::{seq::SliceRandom, Rng};

/// Builds the match-ups of each round from a fresh random permutation of the photos.
///
/// Consecutive photos of the permutation are paired up. When the count is odd the last
/// photo sits the round out and is carried over: the next round puts it first, so it is
/// always in that round's first match.
pub struct PairingSelector<R> {
    rng: R,
    carried: Option<String>,
}

impl<R: Rng> PairingSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, carried: None }
    }

    /// The photo left over from the last round, if any
    pub fn carried(&self) -> Option<&str> {
        self.carried.as_deref()
    }

    pub fn next_round<S: AsRef<str>>(&mut self, photos: &[S]) -> Vec<(String, String)> {
        let mut order: Vec<String> = photos.iter().map(|s| s.as_ref().to_owned()).collect();
        // NOTE: sorting first makes the permutation depend only on the rng, not on the
        // order the caller happened to list the photos in
        order.sort();
        order.dedup();
        order.shuffle(&mut self.rng);

        if let Some(carried) = self.carried.take() {
            match order.iter().position(|name| *name == carried) {
                Some(i) => order.swap(0, i),
                None => log::debug!("Carried photo '{carried}' is gone"),
            }
        }

        if order.len() % 2 == 1 {
            self.carried = order.pop();
            if let Some(carried) = &self.carried {
                log::debug!("'{carried}' sits out this round");
            }
        }

        let mut pairs = Vec::with_capacity(order.len() / 2);
        let mut order = order.into_iter();
        while let (Some(first), Some(second)) = (order.next(), order.next()) {
            debug_assert_ne!(first, second);
            pairs.push((first, second));
        }
        pairs
    }
}

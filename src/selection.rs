use crate::{config::SelectionMode, swatch::DominantColor};

/// Policy parameters for turning ranked clusters into palette entries.
#[derive(Debug, Clone, Copy)]
pub struct Selector {
    pub count: usize,
    pub mode: SelectionMode,
    pub dominant_count: usize,
    pub secondary_count: usize,
    pub diversity_threshold: f32,
}

impl Selector {
    /// Pick exactly `count` colors from `ranked`, which must be sorted by population, most populous first.
    ///
    /// Colors only repeat once every cluster has been used. Returns an empty list if and only if `ranked` is empty.
    pub fn select(&self, ranked: &[DominantColor]) -> Vec<DominantColor> {
        if ranked.is_empty() {
            return Vec::new();
        }

        let picked = match self.mode {
            SelectionMode::TopN => ranked.iter().take(self.count).collect(),
            SelectionMode::Balanced => self.balanced(ranked),
        };

        cycle_to_length(&picked, self.count)
    }

    fn balanced<'a>(&self, ranked: &'a [DominantColor]) -> Vec<&'a DominantColor> {
        let dominant = self.dominant_count.min(ranked.len());
        let mut selected = ranked[..dominant].iter().collect::<Vec<_>>();
        let mut leftovers = Vec::new();

        for candidate in &ranked[dominant..] {
            let slots_left = selected.len() < dominant + self.secondary_count;

            if slots_left && self.is_distinct(candidate, &selected) {
                selected.push(candidate);
            } else {
                leftovers.push(candidate);
            }
        }

        let diverse = selected.len() - dominant;
        let missing = self.secondary_count.saturating_sub(diverse);

        if missing > 0 && !leftovers.is_empty() {
            log::debug!(
                "only {diverse} of {} secondary colors are distinct, filling from leftovers",
                self.secondary_count
            );
        }

        // leftovers stay in population order: unfilled secondary slots first, then the rest of the palette
        selected.extend(leftovers);
        selected
    }

    fn is_distinct(&self, candidate: &DominantColor, selected: &[&DominantColor]) -> bool {
        selected
            .iter()
            .all(|color| color.centroid().distance(candidate.centroid()) > self.diversity_threshold)
    }
}

fn cycle_to_length(colors: &[&DominantColor], count: usize) -> Vec<DominantColor> {
    colors.iter().cycle().take(count).map(|&color| color.clone()).collect()
}

// ---------------- 学习会话状态机 ----------------
// Setup → Studying → MissedReview → Complete
// Complete → Setup（reset）/ Complete → Studying（restart，沿用同一组分类）
//
// 每个转移都按值接收当前会话、返回下一个会话；渲染层只读 snapshot。

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    category::Category,
    deck::{build_deck, shuffle_deck, total_for_selection},
    plant::PlantRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ToggleCategory(Category),
    ToggleShuffle,
    Start,
    Flip,
    MarkMissed,
    Next,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Setup,
    Studying {
        // 在 selected 中的位置
        position: usize,
        category: Category,
        deck: Vec<PlantRecord>,
        card: usize,
    },
    MissedReview {
        deck: Vec<PlantRecord>,
        card: usize,
    },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Setup,
    Studying,
    MissedReview,
    Complete,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Setup => PhaseKind::Setup,
            Phase::Studying { .. } => PhaseKind::Studying,
            Phase::MissedReview { .. } => PhaseKind::MissedReview,
            Phase::Complete => PhaseKind::Complete,
        }
    }

    fn deck_and_card(&self) -> Option<(&[PlantRecord], usize)> {
        match self {
            Phase::Studying { deck, card, .. } | Phase::MissedReview { deck, card } => {
                Some((deck.as_slice(), *card))
            }
            _ => None,
        }
    }
}

/// 渲染层看到的只读视图
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub kind: PhaseKind,
    pub mode_label: Option<&'static str>,
    pub card: Option<&'a PlantRecord>,
    // (当前第几张，从 1 开始, 牌组长度)
    pub progress: Option<(usize, usize)>,
    pub flipped: bool,
    pub missed: usize,
    pub review_hint: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub categories: Vec<&'static str>,
    pub total_available: usize,
    pub missed: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    selected: Vec<Category>,
    shuffle: bool,
    phase: Phase,
    missed: Vec<PlantRecord>,
    flipped: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(vec![Category::FrictionFire], true)
    }
}

impl Session {
    pub fn new(selected: Vec<Category>, shuffle: bool) -> Self {
        let mut uniq: Vec<Category> = Vec::with_capacity(selected.len());
        for c in selected {
            if !uniq.contains(&c) {
                uniq.push(c);
            }
        }
        Self {
            selected: uniq,
            shuffle,
            phase: Phase::Setup,
            missed: Vec::new(),
            flipped: false,
        }
    }

    pub fn selected(&self) -> &[Category] {
        &self.selected
    }

    pub fn is_selected(&self, cat: Category) -> bool {
        self.selected.contains(&cat)
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn missed(&self) -> &[PlantRecord] {
        &self.missed
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn current_card(&self) -> Option<&PlantRecord> {
        let (deck, card) = self.phase.deck_and_card()?;
        deck.get(card)
    }

    pub fn can_start(&self, plants: &[PlantRecord]) -> bool {
        !self.selected.is_empty() && total_for_selection(plants, &self.selected) > 0
    }

    pub fn apply<R: Rng + ?Sized>(
        self,
        intent: Intent,
        plants: &[PlantRecord],
        rng: &mut R,
    ) -> Self {
        let from = self.phase.kind();
        let next = match intent {
            Intent::ToggleCategory(c) => self.toggle_category(c),
            Intent::ToggleShuffle => self.toggle_shuffle(),
            Intent::Start => self.start(plants, rng),
            Intent::Flip => self.flip(),
            Intent::MarkMissed => self.mark_missed(plants, rng),
            Intent::Next => self.next(plants, rng),
            Intent::Reset => self.reset(),
        };
        debug!(?intent, ?from, to = ?next.phase.kind(), "session transition");
        next
    }

    /// 仅 Setup 阶段有效；新勾选的分类追加在末尾，决定遍历顺序
    pub fn toggle_category(mut self, cat: Category) -> Self {
        if self.phase != Phase::Setup {
            return self;
        }
        if let Some(i) = self.selected.iter().position(|c| *c == cat) {
            self.selected.remove(i);
        } else {
            self.selected.push(cat);
        }
        self
    }

    pub fn toggle_shuffle(mut self) -> Self {
        if self.phase == Phase::Setup {
            self.shuffle = !self.shuffle;
        }
        self
    }

    /// Setup 下为开始，Complete 下为 restart。没有可学卡片时原样返回
    pub fn start<R: Rng + ?Sized>(mut self, plants: &[PlantRecord], rng: &mut R) -> Self {
        if !matches!(self.phase, Phase::Setup | Phase::Complete) {
            return self;
        }
        if !self.can_start(plants) {
            warn!(selected = self.selected.len(), "start refused: no cards for selection");
            return self;
        }
        let Some(first) = study_phase_from(&self.selected, 0, plants, self.shuffle, rng) else {
            return self;
        };
        info!(
            categories = ?self.selected.iter().map(|c| c.key()).collect::<Vec<_>>(),
            shuffle = self.shuffle,
            "session started"
        );
        self.missed.clear();
        self.flipped = false;
        self.phase = first;
        self
    }

    pub fn flip(mut self) -> Self {
        if self.current_card().is_some() {
            self.flipped = !self.flipped;
        }
        self
    }

    /// 记为未掌握（按 common_name 去重），随后等同 next()
    pub fn mark_missed<R: Rng + ?Sized>(mut self, plants: &[PlantRecord], rng: &mut R) -> Self {
        let Some(current) = self.current_card().cloned() else {
            return self;
        };
        if !self.missed.iter().any(|p| p.same_card(&current)) {
            self.missed.push(current);
        }
        self.next(plants, rng)
    }

    pub fn next<R: Rng + ?Sized>(mut self, plants: &[PlantRecord], rng: &mut R) -> Self {
        self.flipped = false;
        let phase = std::mem::replace(&mut self.phase, Phase::Setup);
        self.phase = match phase {
            Phase::Studying {
                position,
                category,
                deck,
                card,
            } => {
                if card + 1 < deck.len() {
                    Phase::Studying {
                        position,
                        category,
                        deck,
                        card: card + 1,
                    }
                } else {
                    study_phase_from(&self.selected, position + 1, plants, self.shuffle, rng)
                        .unwrap_or_else(|| review_or_complete(&self.missed, self.shuffle, rng))
                }
            }
            Phase::MissedReview { deck, card } => {
                if card + 1 < deck.len() {
                    Phase::MissedReview {
                        deck,
                        card: card + 1,
                    }
                } else {
                    info!(missed = self.missed.len(), "session complete");
                    Phase::Complete
                }
            }
            other => other,
        };
        self
    }

    /// 任意阶段回到 Setup；分类勾选与 shuffle 保留
    pub fn reset(mut self) -> Self {
        self.phase = Phase::Setup;
        self.missed.clear();
        self.flipped = false;
        self
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let mode_label = match &self.phase {
            Phase::Studying { category, .. } => Some(category.label()),
            Phase::MissedReview { .. } => Some("Missed Review"),
            _ => None,
        };
        let progress = self
            .phase
            .deck_and_card()
            .map(|(deck, card)| (card + 1, deck.len()));
        Snapshot {
            kind: self.phase.kind(),
            mode_label,
            card: self.current_card(),
            progress,
            flipped: self.flipped,
            missed: self.missed.len(),
            review_hint: matches!(self.phase, Phase::Studying { .. }) && !self.missed.is_empty(),
        }
    }

    pub fn summary(&self, plants: &[PlantRecord]) -> Summary {
        Summary {
            categories: self.selected.iter().map(|c| c.label()).collect(),
            total_available: total_for_selection(plants, &self.selected),
            missed: self.missed.len(),
        }
    }
}

// 从 selected[from..] 中找第一个非空分类，空分类直接跳过
fn study_phase_from<R: Rng + ?Sized>(
    selected: &[Category],
    from: usize,
    plants: &[PlantRecord],
    shuffle: bool,
    rng: &mut R,
) -> Option<Phase> {
    selected
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(position, category)| {
            let deck = build_deck(plants, *category, shuffle, rng);
            if deck.is_empty() {
                debug!(category = category.key(), "skipping empty category");
                return None;
            }
            Some(Phase::Studying {
                position,
                category: *category,
                deck,
                card: 0,
            })
        })
}

fn review_or_complete<R: Rng + ?Sized>(
    missed: &[PlantRecord],
    shuffle: bool,
    rng: &mut R,
) -> Phase {
    if missed.is_empty() {
        info!("session complete");
        return Phase::Complete;
    }
    info!(missed = missed.len(), "entering missed review");
    Phase::MissedReview {
        deck: shuffle_deck(missed.to_vec(), shuffle, rng),
        card: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn plant(name: &str) -> PlantRecord {
        PlantRecord {
            common_name: name.into(),
            ..Default::default()
        }
    }

    fn fire(name: &str) -> PlantRecord {
        let mut p = plant(name);
        p.friction_fire.spindle = true;
        p
    }

    fn cord(name: &str) -> PlantRecord {
        let mut p = plant(name);
        p.cordage.usable = true;
        p
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn step(s: Session, intent: Intent, plants: &[PlantRecord], r: &mut StdRng) -> Session {
        s.apply(intent, plants, r)
    }

    fn fire_deck(n: usize) -> Vec<PlantRecord> {
        (0..n).map(|i| fire(&format!("Plant {i}"))).collect()
    }

    fn deck_names(s: &Session) -> Vec<String> {
        match s.phase() {
            Phase::Studying { deck, .. } | Phase::MissedReview { deck, .. } => {
                deck.iter().map(|p| p.common_name.clone()).collect()
            }
            _ => Vec::new(),
        }
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    fn current_name(s: &Session) -> Option<String> {
        s.current_card().map(|p| p.common_name.clone())
    }

    #[test]
    fn single_category_in_dataset_order_completes() {
        let plants = vec![fire("Willow"), plant("Oak"), fire("Cedar"), fire("Yucca")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Start, &plants, &mut r);
        assert_eq!(s.phase().kind(), PhaseKind::Studying);

        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(current_name(&s).unwrap());
            s = step(s, Intent::Next, &plants, &mut r);
        }
        assert_eq!(seen, vec!["Willow", "Cedar", "Yucca"]);
        assert_eq!(s.phase().kind(), PhaseKind::Complete);
        assert!(s.missed().is_empty());
    }

    #[test]
    fn empty_category_is_skipped() {
        let plants = vec![fire("Willow"), fire("Cedar"), plant("Oak")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire, Category::Tinder], false);
        s = step(s, Intent::Start, &plants, &mut r);

        let mut shown = 0;
        while s.phase().kind() != PhaseKind::Complete {
            let snap = s.snapshot();
            assert_eq!(snap.mode_label, Some("Friction Fire"));
            assert!(snap.card.is_some());
            shown += 1;
            s = step(s, Intent::Next, &plants, &mut r);
        }
        assert_eq!(shown, 2);
    }

    #[test]
    fn leading_empty_category_is_never_shown() {
        let plants = vec![cord("Dogbane"), cord("Nettle")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::Tinder, Category::Cordage], false);
        s = step(s, Intent::Start, &plants, &mut r);
        let snap = s.snapshot();
        assert_eq!(snap.mode_label, Some("Cordage"));
        assert_eq!(snap.progress, Some((1, 2)));
    }

    #[test]
    fn missed_card_is_reviewed_once_at_the_end() {
        let plants = vec![fire("Willow"), fire("Cedar"), fire("Yucca")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Start, &plants, &mut r);
        s = step(s, Intent::MarkMissed, &plants, &mut r);
        assert_eq!(current_name(&s).as_deref(), Some("Cedar"));
        assert!(s.snapshot().review_hint);
        s = step(s, Intent::Next, &plants, &mut r);
        s = step(s, Intent::Next, &plants, &mut r);

        assert_eq!(s.phase().kind(), PhaseKind::MissedReview);
        let snap = s.snapshot();
        assert_eq!(snap.mode_label, Some("Missed Review"));
        assert_eq!(snap.progress, Some((1, 1)));
        assert_eq!(current_name(&s).as_deref(), Some("Willow"));
        assert!(!snap.review_hint);

        s = step(s, Intent::Next, &plants, &mut r);
        assert_eq!(s.phase().kind(), PhaseKind::Complete);
        assert_eq!(s.summary(&plants).missed, 1);
    }

    #[test]
    fn start_without_selection_changes_nothing() {
        let plants = vec![fire("Willow")];
        let mut r = rng();
        let s = Session::new(vec![], true);
        let after = step(s.clone(), Intent::Start, &plants, &mut r);
        assert_eq!(after.phase(), &Phase::Setup);
        assert_eq!(after.selected(), s.selected());
        assert_eq!(after.shuffle(), s.shuffle());
        assert!(after.missed().is_empty());
    }

    #[test]
    fn start_is_refused_when_every_selected_category_is_empty() {
        let plants = vec![fire("Willow")];
        let mut r = rng();
        let s = Session::new(vec![Category::Tinder, Category::Medicinal], false);
        assert!(!s.can_start(&plants));
        let s = step(s, Intent::Start, &plants, &mut r);
        assert_eq!(s.phase().kind(), PhaseKind::Setup);
        assert!(s.current_card().is_none());
    }

    #[test]
    fn marking_same_card_twice_does_not_duplicate() {
        let plants = vec![fire("Willow"), fire("Cedar")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Start, &plants, &mut r);
        s = step(s, Intent::MarkMissed, &plants, &mut r);
        s = step(s, Intent::Next, &plants, &mut r);
        // 进入复习，再次标记 Willow
        assert_eq!(s.phase().kind(), PhaseKind::MissedReview);
        assert_eq!(current_name(&s).as_deref(), Some("Willow"));
        s = step(s, Intent::MarkMissed, &plants, &mut r);
        assert_eq!(s.missed().len(), 1);
        assert_eq!(s.phase().kind(), PhaseKind::Complete);
    }

    #[test]
    fn same_plant_in_two_categories_is_missed_once() {
        let mut both = fire("Basswood");
        both.cordage.usable = true;
        let plants = vec![both];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire, Category::Cordage], false);
        s = step(s, Intent::Start, &plants, &mut r);
        s = step(s, Intent::MarkMissed, &plants, &mut r);
        assert_eq!(s.snapshot().mode_label, Some("Cordage"));
        s = step(s, Intent::MarkMissed, &plants, &mut r);
        assert_eq!(s.missed().len(), 1);
        assert_eq!(s.phase().kind(), PhaseKind::MissedReview);
    }

    #[test]
    fn next_reaches_complete_within_bound() {
        let plants: Vec<PlantRecord> = (0..9)
            .map(|i| {
                let mut p = plant(&format!("p{i}"));
                p.friction_fire.hearth = i % 2 == 0;
                p.cordage.usable = i % 3 == 0;
                p.wood.usable = i == 4;
                p
            })
            .collect();
        let selections = [
            vec![Category::FrictionFire],
            vec![Category::Cordage, Category::Tinder, Category::Wood],
            vec![Category::Medicinal, Category::Wood, Category::FrictionFire],
        ];
        for (seed, selected) in selections.iter().enumerate() {
            let mut r = StdRng::seed_from_u64(seed as u64);
            let total = total_for_selection(&plants, selected);
            let mut s = Session::new(selected.clone(), true);
            s = step(s, Intent::Start, &plants, &mut r);
            let mut steps = 0;
            while s.phase().kind() != PhaseKind::Complete {
                // 每隔一张标记一次
                let intent = if steps % 2 == 0 {
                    Intent::MarkMissed
                } else {
                    Intent::Next
                };
                s = step(s, intent, &plants, &mut r);
                steps += 1;
                assert!(steps <= total + s.missed().len());
            }
        }
    }

    #[test]
    fn categories_follow_toggle_order() {
        let plants = vec![fire("Willow"), cord("Dogbane")];
        let mut r = rng();
        let mut s = Session::new(vec![], false);
        s = step(s, Intent::ToggleCategory(Category::Cordage), &plants, &mut r);
        s = step(s, Intent::ToggleCategory(Category::FrictionFire), &plants, &mut r);
        assert_eq!(s.selected(), &[Category::Cordage, Category::FrictionFire]);
        s = step(s, Intent::Start, &plants, &mut r);
        assert_eq!(s.snapshot().mode_label, Some("Cordage"));
        s = step(s, Intent::Next, &plants, &mut r);
        assert_eq!(s.snapshot().mode_label, Some("Friction Fire"));
    }

    #[test]
    fn retoggling_moves_category_to_the_end() {
        let plants: Vec<PlantRecord> = vec![];
        let mut r = rng();
        let mut s = Session::new(vec![Category::Wood, Category::Tinder], false);
        s = step(s, Intent::ToggleCategory(Category::Wood), &plants, &mut r);
        s = step(s, Intent::ToggleCategory(Category::Wood), &plants, &mut r);
        assert_eq!(s.selected(), &[Category::Tinder, Category::Wood]);
    }

    #[test]
    fn settings_are_locked_outside_setup() {
        let plants = vec![fire("Willow"), fire("Cedar")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Start, &plants, &mut r);
        s = step(s, Intent::ToggleCategory(Category::Tinder), &plants, &mut r);
        s = step(s, Intent::ToggleShuffle, &plants, &mut r);
        assert_eq!(s.selected(), &[Category::FrictionFire]);
        assert!(!s.shuffle());
        // 学习中再次 start 无效
        s = step(s, Intent::Next, &plants, &mut r);
        s = step(s, Intent::Start, &plants, &mut r);
        assert_eq!(s.snapshot().progress, Some((2, 2)));
    }

    #[test]
    fn flip_toggles_and_card_change_resets_it() {
        let plants = vec![fire("Willow"), fire("Cedar")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Flip, &plants, &mut r);
        assert!(!s.is_flipped());
        s = step(s, Intent::Start, &plants, &mut r);
        s = step(s, Intent::Flip, &plants, &mut r);
        assert!(s.is_flipped());
        s = step(s, Intent::Flip, &plants, &mut r);
        assert!(!s.is_flipped());
        s = step(s, Intent::Flip, &plants, &mut r);
        s = step(s, Intent::Next, &plants, &mut r);
        assert!(!s.is_flipped());
    }

    #[test]
    fn reset_keeps_selection_and_clears_run() {
        let plants = vec![fire("Willow"), fire("Cedar")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Start, &plants, &mut r);
        s = step(s, Intent::MarkMissed, &plants, &mut r);
        s = step(s, Intent::Flip, &plants, &mut r);
        s = step(s, Intent::Reset, &plants, &mut r);
        assert_eq!(s.phase(), &Phase::Setup);
        assert!(s.missed().is_empty());
        assert!(!s.is_flipped());
        assert_eq!(s.selected(), &[Category::FrictionFire]);
    }

    #[test]
    fn restart_from_complete_replays_selection() {
        let plants = vec![fire("Willow")];
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Start, &plants, &mut r);
        s = step(s, Intent::MarkMissed, &plants, &mut r);
        s = step(s, Intent::Next, &plants, &mut r);
        assert_eq!(s.phase().kind(), PhaseKind::Complete);
        assert_eq!(s.missed().len(), 1);

        s = step(s, Intent::Start, &plants, &mut r);
        assert_eq!(s.phase().kind(), PhaseKind::Studying);
        assert!(s.missed().is_empty());
        assert_eq!(current_name(&s).as_deref(), Some("Willow"));
    }

    #[test]
    fn next_and_flip_are_noops_without_a_card() {
        let plants = vec![fire("Willow")];
        let mut r = rng();
        let s = Session::new(vec![Category::FrictionFire], false);
        let s = step(s, Intent::Next, &plants, &mut r);
        let s = step(s, Intent::MarkMissed, &plants, &mut r);
        assert_eq!(s.phase(), &Phase::Setup);
        assert!(s.missed().is_empty());
    }

    #[test]
    fn summary_reports_selection_totals() {
        let mut both = fire("Basswood");
        both.cordage.usable = true;
        let plants = vec![both, fire("Willow"), plant("Oak")];
        let s = Session::new(vec![Category::Cordage, Category::FrictionFire], true);
        let sum = s.summary(&plants);
        assert_eq!(sum.categories, vec!["Cordage", "Friction Fire"]);
        assert_eq!(sum.total_available, 3);
        assert_eq!(sum.missed, 0);
    }

    #[test]
    fn duplicate_initial_selection_is_collapsed() {
        let s = Session::new(
            vec![Category::Wood, Category::Wood, Category::Tinder],
            false,
        );
        assert_eq!(s.selected(), &[Category::Wood, Category::Tinder]);
    }

    #[test]
    fn restart_draws_a_fresh_shuffle() {
        let plants = fire_deck(10);
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], true);
        s = step(s, Intent::Start, &plants, &mut r);
        let first = deck_names(&s);
        for _ in 0..plants.len() {
            s = step(s, Intent::Next, &plants, &mut r);
        }
        assert_eq!(s.phase().kind(), PhaseKind::Complete);

        s = step(s, Intent::Start, &plants, &mut r);
        let second = deck_names(&s);
        assert_ne!(first, second);
        assert_eq!(sorted(first), sorted(second));
    }

    #[test]
    fn each_category_gets_its_own_shuffle() {
        let mut plants = fire_deck(10);
        for p in plants.iter_mut() {
            p.cordage.usable = true;
        }
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire, Category::Cordage], true);
        s = step(s, Intent::Start, &plants, &mut r);
        let fire_order = deck_names(&s);
        for _ in 0..plants.len() {
            s = step(s, Intent::Next, &plants, &mut r);
        }
        assert_eq!(s.snapshot().mode_label, Some("Cordage"));
        assert_ne!(deck_names(&s), fire_order);
    }

    #[test]
    fn missed_review_is_shuffled_when_shuffle_is_on() {
        let plants = fire_deck(10);
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], true);
        s = step(s, Intent::Start, &plants, &mut r);
        let mut marked = Vec::new();
        for _ in 0..plants.len() {
            marked.push(current_name(&s).unwrap());
            s = step(s, Intent::MarkMissed, &plants, &mut r);
        }
        assert_eq!(s.phase().kind(), PhaseKind::MissedReview);
        let review = deck_names(&s);
        assert_ne!(review, marked);
        assert_eq!(sorted(review), sorted(marked));
    }

    #[test]
    fn missed_review_keeps_marking_order_without_shuffle() {
        let plants = fire_deck(10);
        let mut r = rng();
        let mut s = Session::new(vec![Category::FrictionFire], false);
        s = step(s, Intent::Start, &plants, &mut r);
        let mut marked = Vec::new();
        for i in 0..plants.len() {
            if i % 3 == 0 {
                marked.push(current_name(&s).unwrap());
                s = step(s, Intent::MarkMissed, &plants, &mut r);
            } else {
                s = step(s, Intent::Next, &plants, &mut r);
            }
        }
        assert_eq!(s.phase().kind(), PhaseKind::MissedReview);
        assert_eq!(marked, vec!["Plant 0", "Plant 3", "Plant 6", "Plant 9"]);
        assert_eq!(deck_names(&s), marked);
    }
}

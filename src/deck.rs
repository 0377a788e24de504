// ---------------- 牌组 ----------------
// 每次切换分类都重新构建，打乱顺序不复用

use rand::{seq::SliceRandom, Rng};

use crate::{category::Category, plant::PlantRecord};

/// 过滤出某分类的卡片；`shuffle` 时在副本上做 Fisher–Yates，输入保持不变
pub fn build_deck<R: Rng + ?Sized>(
    plants: &[PlantRecord],
    category: Category,
    shuffle: bool,
    rng: &mut R,
) -> Vec<PlantRecord> {
    let cards: Vec<PlantRecord> = plants
        .iter()
        .filter(|p| category.matches(p))
        .cloned()
        .collect();
    shuffle_deck(cards, shuffle, rng)
}

pub fn shuffle_deck<R: Rng + ?Sized>(
    mut cards: Vec<PlantRecord>,
    shuffle: bool,
    rng: &mut R,
) -> Vec<PlantRecord> {
    if shuffle {
        cards.shuffle(rng);
    }
    cards
}

pub fn count_matching(plants: &[PlantRecord], category: Category) -> usize {
    plants.iter().filter(|p| category.matches(p)).count()
}

/// 同一植物命中多个分类时按分类各计一次
pub fn total_for_selection(plants: &[PlantRecord], selected: &[Category]) -> usize {
    selected.iter().map(|c| count_matching(plants, *c)).sum()
}

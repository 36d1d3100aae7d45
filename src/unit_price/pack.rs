//! Pack multiplier detection ("Pack of 2", "3-Pack", ", 4 Bottles").

use super::rules::RuleTable;
use std::ops::{Range, RangeInclusive};
use tracing::trace;

/// Plausible number of containers in one listing.
pub const PACK_RANGE: RangeInclusive<u32> = 2..=24;

/// Returns how many containers the listing bundles, 1 when none is detected.
///
/// `unit` is the canonical unit of the chosen category. A container word
/// already named by that unit is not counted again, and neither is text in
/// `consumed`, the span the quantity itself was read from.
pub fn pack_multiplier(table: &RuleTable, name: &str, unit: &str, consumed: &Range<usize>) -> u32 {
    let unit = unit.to_lowercase();

    for rule in table.packs() {
        if !rule.is_generic() && unit.contains(&rule.container) {
            continue;
        }

        for caps in rule.pattern.captures_iter(name) {
            let Some(whole) = caps.get(0) else { continue };
            if overlaps(&whole.range(), consumed) {
                continue;
            }
            let Some(count) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
                continue;
            };
            if PACK_RANGE.contains(&count) {
                trace!(container = %rule.container, count, "pack multiplier detected");
                return count;
            }
            trace!(container = %rule.container, count, "implausible pack size ignored");
        }
    }

    1
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(name: &str, unit: &str) -> u32 {
        pack_multiplier(RuleTable::builtin(), name, unit, &(0..0))
    }

    #[test]
    fn test_pack_phrases() {
        assert_eq!(detect("Skippy Peanut Butter 16.3 oz, Pack of 2", "oz"), 2);
        assert_eq!(detect("Lysol Wipes, 4-Pack (80 wipes each)", "wipe"), 4);
        assert_eq!(detect("Bonne Maman Preserves 13 oz, 3 Jars", "oz"), 3);
        assert_eq!(detect("Crest Toothpaste 4.1 oz, 3 Tubes", "oz"), 3);
        assert_eq!(detect("Dish Soap 19.4 fl oz, 2 Bottles", "oz"), 2);
    }

    #[test]
    fn test_no_pack() {
        assert_eq!(detect("Folgers Classic Roast Ground Coffee, 25 oz", "oz"), 1);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(detect("Peanut Butter 16 oz, Pack of 1", "oz"), 1);
        assert_eq!(detect("Peanut Butter 16 oz, Pack of 30", "oz"), 1);
        assert_eq!(detect("Peanut Butter 16 oz, Pack of 2", "oz"), 2);
        assert_eq!(detect("Peanut Butter 16 oz, Pack of 24", "oz"), 24);
        assert_eq!(detect("Peanut Butter 16 oz, Pack of 25", "oz"), 1);
    }

    #[test]
    fn test_container_named_by_unit_is_skipped() {
        assert_eq!(detect("Cat Food, 12 Cans", "can"), 1);
        assert_eq!(detect("Cat Food, 12 Cans", "oz"), 12);
        assert_eq!(detect("Deodorant 2.6 oz, 2 Sticks", "stick"), 1);
    }

    #[test]
    fn test_generic_pack_not_skipped_by_unit() {
        assert_eq!(detect("Sparkling Water 12 fl oz, 8-Pack", "pack"), 8);
    }

    #[test]
    fn test_consumed_span_not_counted_twice() {
        let name = "Gillette Clinical Deodorant Cool Wave (3-pack)";
        let start = name.find("3-pack").unwrap();
        let span = start..start + "3-pack".len();
        assert_eq!(pack_multiplier(RuleTable::builtin(), name, "stick", &span), 1);
        assert_eq!(detect(name, "stick"), 3);
    }

    #[test]
    fn test_rejected_count_keeps_scanning() {
        assert_eq!(detect("Honey 12 oz, Pack of 48, 2 Jars", "oz"), 2);
    }
}

//! Impact resolution along a projectile or beam path
//!
//! A raycast returns every surface along a segment. Hits are applied nearest
//! first; each component spends what it can and hands the rest inward
//! (armor -> bone -> organ). A surface that cannot be damaged stops the shot.

use serde::{Deserialize, Serialize};

use crate::condition::body_part::BodyPart;
use crate::condition::manager::{ArmorManager, ConditionTarget};

/// One raycast hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub distance: f32,
    /// `None` for walls and other undamageable obstacles
    pub target: Option<ConditionTarget>,
    /// Triangle index of the hit on the target's surface
    pub cell_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub leftover: f32,
    /// Part remembered for the next segment of the same shot
    pub targeted_part: BodyPart,
    pub components_hit: usize,
}

/// Apply a shot carrying `energy` over `area` to a set of hits
///
/// `targeted_part` is the part the shot last passed through; tagged
/// components (armor pieces) replace it so bones behind them know which bone
/// was struck.
pub fn resolve_impacts(
    manager: &mut ArmorManager,
    energy: f32,
    area: f32,
    targeted_part: BodyPart,
    impacts: &[Impact],
) -> ImpactResult {
    let mut ordered: Vec<&Impact> = impacts.iter().collect();
    ordered.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let mut energy = energy.max(0.0);
    let mut part = targeted_part;
    let mut components_hit = 0;

    for impact in ordered {
        if energy <= 0.0 {
            break;
        }
        let Some(target) = impact.target else {
            energy = 0.0;
            break;
        };
        let target_part = manager.target_body_part(target);
        if target_part != BodyPart::None {
            part = target_part;
        }
        energy = manager.damage_condition(target, energy, area, part, impact.cell_index);
        components_hit += 1;
    }

    ImpactResult {
        leftover: energy,
        targeted_part: part,
        components_hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::armor::ArmorComponent;
    use crate::condition::geometry::CellGeometry;
    use crate::condition::organ::Organ;
    use crate::condition::skeleton::Skeleton;

    fn torso() -> ArmorManager {
        let plate = ArmorComponent::humanoid(BodyPart::UpperTorso, CellGeometry::new(0.4, 4), 0.01, true);
        ArmorManager::new(Skeleton::new(100.0), vec![Organ::new("Heart", 50.0)], vec![plate]).unwrap()
    }

    #[test]
    fn test_unarmored_shot_reaches_heart() {
        let mut manager = torso();
        let heart = manager.organ_target("Heart").unwrap();
        let impacts = [
            Impact {
                distance: 0.3,
                target: Some(heart),
                cell_index: 0,
            },
            Impact {
                distance: 0.1,
                target: Some(ConditionTarget::Armor(0)),
                cell_index: 2,
            },
            Impact {
                distance: 0.2,
                target: Some(ConditionTarget::Skeleton),
                cell_index: 0,
            },
        ];

        let result = resolve_impacts(&mut manager, 200.0, 0.0001, BodyPart::None, &impacts);
        // no armor installed: ribcage takes 100, heart takes 50
        assert_eq!(result.leftover, 50.0);
        assert_eq!(result.targeted_part, BodyPart::UpperTorso);
        assert_eq!(result.components_hit, 3);
        assert!(manager.skeleton().is_broken(BodyPart::UpperTorso));
        assert!(manager.is_dead());
    }

    #[test]
    fn test_wall_stops_shot() {
        let mut manager = torso();
        let impacts = [
            Impact {
                distance: 0.5,
                target: None,
                cell_index: 0,
            },
            Impact {
                distance: 1.0,
                target: Some(ConditionTarget::Skeleton),
                cell_index: 0,
            },
        ];
        let result = resolve_impacts(&mut manager, 500.0, 0.0001, BodyPart::UpperTorso, &impacts);
        assert_eq!(result.leftover, 0.0);
        assert_eq!(result.components_hit, 0);
        assert!(!manager.skeleton().is_broken(BodyPart::UpperTorso));
    }

    #[test]
    fn test_spent_shot_stops_early() {
        let mut manager = torso();
        let impacts = [
            Impact {
                distance: 0.1,
                target: Some(ConditionTarget::Skeleton),
                cell_index: 0,
            },
            Impact {
                distance: 0.2,
                target: Some(ConditionTarget::Organ(0)),
                cell_index: 0,
            },
        ];
        let result = resolve_impacts(&mut manager, 40.0, 0.0001, BodyPart::UpperTorso, &impacts);
        assert_eq!(result.leftover, 0.0);
        assert_eq!(result.components_hit, 1);
        assert!(!manager.is_dead());
    }
}

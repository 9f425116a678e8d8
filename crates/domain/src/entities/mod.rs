//! Catalog entities: the read-only rules data characters are built from.

mod ancestry;
mod archetype;
mod background;
mod class;
mod item;
mod monster;
mod talent;

pub use ancestry::{Ancestry, AncestryBoon, AncestryFeat, FeatChoice};
pub use archetype::{Archetype, Role};
pub use background::{Background, GearGrant};
pub use class::{ClassDef, SynergyFeat};
pub use item::{Item, ItemKind, ItemTag};
pub use monster::{ChassisRow, DamageDie, MonsterChassis, MonsterFamily};
pub use talent::{ChoiceKind, CreationSlot, KnownTalent, Talent, TalentFlags, TalentSource};

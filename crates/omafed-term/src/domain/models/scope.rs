use strum::Display;
use strum::EnumIter;
use strum::EnumString;

/// Which scripts a confirmed session converts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ConvertScope {
    /// Every script in the repository.
    #[default]
    All,
    /// Every script except the ones backing the selected items.
    Unselected,
}

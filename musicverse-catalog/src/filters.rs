//! Filter settings and partial updates

use serde::{Deserialize, Serialize};

/// Genre filter value that matches every genre
pub const ALL_GENRES: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Title,
    Artist,
    Album,
    Year,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    Artist,
    Album,
    Genre,
}

macro_rules! keyword_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($ty::$variant => f.write_str($name),)+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(format!(
                        "Unknown {}: {} (expected one of: {})",
                        stringify!($ty),
                        s,
                        [$($name),+].join(", ")
                    )),
                }
            }
        }
    };
}

keyword_enum!(SortBy { Title => "title", Artist => "artist", Album => "album", Year => "year" });
keyword_enum!(SortOrder { Asc => "asc", Desc => "desc" });
keyword_enum!(GroupBy { None => "none", Artist => "artist", Album => "album", Genre => "genre" });

/// Current search, sort, group and genre settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicFilters {
    pub search: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub group_by: GroupBy,
    /// Exact genre to keep; empty or `"all"` keeps every genre
    pub genre: String,
}

impl MusicFilters {
    /// Merge the fields present in `update`; absent fields keep their value
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(search) = update.search {
            self.search = search;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(sort_order) = update.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(group_by) = update.group_by {
            self.group_by = group_by;
        }
        if let Some(genre) = update.genre {
            self.genre = genre;
        }
    }

    pub fn genre_filter_active(&self) -> bool {
        !self.genre.is_empty() && self.genre != ALL_GENRES
    }
}

/// A partial set of filter changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub group_by: Option<GroupBy>,
    pub genre: Option<String>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// An update that sets every field back to its default
    pub fn reset() -> Self {
        let defaults = MusicFilters::default();
        Self {
            search: Some(defaults.search),
            sort_by: Some(defaults.sort_by),
            sort_order: Some(defaults.sort_order),
            group_by: Some(defaults.group_by),
            genre: Some(defaults.genre),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filters = MusicFilters::default();
        assert_eq!(filters.search, "");
        assert_eq!(filters.sort_by, SortBy::Title);
        assert_eq!(filters.sort_order, SortOrder::Asc);
        assert_eq!(filters.group_by, GroupBy::None);
        assert_eq!(filters.genre, "");
        assert!(!filters.genre_filter_active());
    }

    #[test]
    fn test_partial_merge_keeps_other_fields() {
        let mut filters = MusicFilters::default();
        filters.apply(FilterUpdate::new().search("queen").sort_by(SortBy::Year));
        filters.apply(FilterUpdate::new().genre("Rock"));

        assert_eq!(filters.search, "queen");
        assert_eq!(filters.sort_by, SortBy::Year);
        assert_eq!(filters.sort_order, SortOrder::Asc);
        assert_eq!(filters.genre, "Rock");
        assert!(filters.genre_filter_active());

        filters.apply(FilterUpdate::reset());
        assert_eq!(filters, MusicFilters::default());
    }

    #[test]
    fn test_keyword_parsing() {
        assert_eq!("year".parse::<SortBy>(), Ok(SortBy::Year));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert_eq!("genre".parse::<GroupBy>(), Ok(GroupBy::Genre));
        assert!("duration".parse::<SortBy>().is_err());
        assert_eq!(GroupBy::Album.to_string(), "album");
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    }

    #[test]
    fn test_wire_names() {
        let filters = MusicFilters {
            sort_by: SortBy::Year,
            ..MusicFilters::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["sortBy"], "year");
        assert_eq!(json["sortOrder"], "asc");
        assert_eq!(json["groupBy"], "none");
    }
}

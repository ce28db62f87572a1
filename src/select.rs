//! Category selection: which parts of the metadata report to show.
//!
//! User-facing flags map to [`Token`]s; an ordered token sequence folds
//! into an immutable [`Selection`]. Exclusive tokens narrow the report
//! to a single category and the last one wins outright — earlier
//! exclusive tokens are overridden, not merged.

use crate::error::ScanError;

/// A metadata category the report can show or hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Basic,
    Exif,
    Iptc,
    Xmp,
    Comments,
    Gps,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Basic => "Basic",
            Category::Exif => "EXIF",
            Category::Iptc => "IPTC",
            Category::Xmp => "XMP",
            Category::Comments => "Comments",
            Category::Gps => "GPS",
        }
    }
}

/// One parsed selection token.
///
/// `Only` tokens are exclusive; `All`, `Verbose` and `Json` are additive
/// and never change category membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Only(Category),
    All,
    Verbose,
    Json,
}

impl Token {
    /// Maps a user-facing flag to its token, case-insensitively.
    pub fn parse(arg: &str) -> Result<Token, ScanError> {
        match arg.to_ascii_lowercase().as_str() {
            "--exif" | "-e" => Ok(Token::Only(Category::Exif)),
            "--iptc" | "-i" => Ok(Token::Only(Category::Iptc)),
            "--xmp" | "-x" => Ok(Token::Only(Category::Xmp)),
            "--comments" | "-c" => Ok(Token::Only(Category::Comments)),
            "--gps" | "-g" => Ok(Token::Only(Category::Gps)),
            "--basic" | "-b" => Ok(Token::Only(Category::Basic)),
            "--all" | "-a" => Ok(Token::All),
            "--verbose" | "-v" => Ok(Token::Verbose),
            "--json" | "-j" => Ok(Token::Json),
            _ => Err(ScanError::UnknownOption {
                option: arg.to_string(),
            }),
        }
    }
}

/// The set of categories a report run displays. Built once, immutable
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub basic: bool,
    pub exif: bool,
    pub iptc: bool,
    pub xmp: bool,
    pub comments: bool,
    pub gps: bool,
}

impl Selection {
    /// Everything selected — the default when no exclusive token appears.
    pub fn all() -> Self {
        Self {
            basic: true,
            exif: true,
            iptc: true,
            xmp: true,
            comments: true,
            gps: true,
        }
    }

    /// Exactly one category selected.
    pub fn only(category: Category) -> Self {
        let none = Self {
            basic: false,
            exif: false,
            iptc: false,
            xmp: false,
            comments: false,
            gps: false,
        };
        match category {
            Category::Basic => Self { basic: true, ..none },
            Category::Exif => Self { exif: true, ..none },
            Category::Iptc => Self { iptc: true, ..none },
            Category::Xmp => Self { xmp: true, ..none },
            Category::Comments => Self { comments: true, ..none },
            Category::Gps => Self { gps: true, ..none },
        }
    }

    /// Folds an ordered token sequence into a selection: start all-true,
    /// each exclusive token replaces the whole selection, the last one
    /// wins.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        tokens.into_iter().fold(Self::all(), |selection, token| match token {
            Token::Only(category) => Self::only(category),
            Token::All | Token::Verbose | Token::Json => selection,
        })
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

/// Everything one run needs from the token stream: the category
/// selection plus the two additive output flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub selection: Selection,
    pub json: bool,
    pub verbose: bool,
}

impl RunConfig {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        Self {
            selection: Selection::from_tokens(tokens.iter().copied()),
            json: tokens.contains(&Token::Json),
            verbose: tokens.contains(&Token::Verbose),
        }
    }

    /// Parses raw flag strings and folds them in one step.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ScanError> {
        let tokens = args
            .iter()
            .map(|arg| Token::parse(arg.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_tokens(&tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn no_exclusive_token_selects_everything() {
        let selection = Selection::from_tokens([Token::Verbose, Token::Json]);
        assert_eq!(selection, Selection::all());
    }

    #[test]
    fn last_exclusive_token_wins() {
        let selection =
            Selection::from_tokens([Token::Only(Category::Exif), Token::Only(Category::Gps)]);
        assert_eq!(selection, Selection::only(Category::Gps));
        assert!(selection.gps);
        assert!(!selection.exif && !selection.basic && !selection.iptc);
    }

    #[test]
    fn all_token_is_a_no_op() {
        let selection = Selection::from_tokens([Token::Only(Category::Iptc), Token::All]);
        assert_eq!(selection, Selection::only(Category::Iptc));
        assert_eq!(Selection::from_tokens([Token::All]), Selection::all());
    }

    #[test]
    fn parse_maps_long_and_short_flags() {
        assert_eq!(Token::parse("--exif").unwrap(), Token::Only(Category::Exif));
        assert_eq!(Token::parse("-g").unwrap(), Token::Only(Category::Gps));
        assert_eq!(Token::parse("--json").unwrap(), Token::Json);
        assert_eq!(Token::parse("-a").unwrap(), Token::All);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Token::parse("--EXIF").unwrap(), Token::Only(Category::Exif));
        assert_eq!(Token::parse("-J").unwrap(), Token::Json);
    }

    #[test]
    fn parse_rejects_unknown_flags() {
        assert_matches!(
            Token::parse("--bogus"),
            Err(ScanError::UnknownOption { option }) if option == "--bogus"
        );
    }

    #[test]
    fn run_config_collects_additive_flags() {
        let config = RunConfig::from_args(&["--gps", "--json", "--verbose"]).unwrap();
        assert!(config.json);
        assert!(config.verbose);
        assert_eq!(config.selection, Selection::only(Category::Gps));
    }

    #[test]
    fn run_config_propagates_unknown_option() {
        assert_matches!(
            RunConfig::from_args(&["--exif", "--wat"]),
            Err(ScanError::UnknownOption { option }) if option == "--wat"
        );
    }
}

//! Option axes of a coloring page spec.
//!
//! Every axis is a closed enum with a fixed wire spelling. Adding a
//! variant forces every exhaustive `match` over it (the line vocabulary
//! in particular) to be revisited at compile time.

use serde::{Deserialize, Serialize};

/// An option value that does not belong to its axis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {axis} value: {value}")]
pub struct UnknownOption {
    pub axis: &'static str,
    pub value: String,
}

macro_rules! option_axis {
    (
        $(#[$meta:meta])*
        $name:ident, $axis:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every value of this axis, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire spelling, as accepted on input.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(UnknownOption {
                        axis: $axis,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

option_axis! {
    /// Whether the page carries a numbered list or only the title.
    ListMode, "listMode" {
        List => "list",
        TitleOnly => "title_only",
    }
}

option_axis! {
    /// Horizontal alignment of the main text.
    Alignment, "alignment" {
        Left => "left",
        Center => "center",
    }
}

option_axis! {
    /// How strictly list numbers line up.
    NumberAlignment, "numberAlignment" {
        Strict => "strict",
        Loose => "loose",
    }
}

option_axis! {
    ListGutter, "listGutter" {
        Tight => "tight",
        Normal => "normal",
        Loose => "loose",
    }
}

option_axis! {
    TextSize, "textSize" {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

option_axis! {
    FontStyle, "fontStyle" {
        Rounded => "rounded",
        Block => "block",
        Hand => "hand",
    }
}

option_axis! {
    ColorMode, "colorMode" {
        BlackAndWhiteOnly => "black_and_white_only",
        Grayscale => "grayscale",
        Color => "color",
    }
}

option_axis! {
    /// Density of outline icons around the text.
    Decorations, "decorations" {
        None => "none",
        Minimal => "minimal",
        Dense => "dense",
    }
}

option_axis! {
    Illustrations, "illustrations" {
        None => "none",
        Simple => "simple",
        Scene => "scene",
    }
}

option_axis! {
    Shading, "shading" {
        None => "none",
        Hatch => "hatch",
        Stippling => "stippling",
    }
}

option_axis! {
    Border, "border" {
        None => "none",
        Plain => "plain",
        Decorative => "decorative",
    }
}

option_axis! {
    OutputFormat, "outputFormat" {
        Png => "png",
        Pdf => "pdf",
    }
}

option_axis! {
    PageSize, "pageSize" {
        UsLetter => "US_Letter",
        A4 => "A4",
    }
}

//! Manufacturing catalog: processes, materials and finishes
//!
//! The tags defined here are the wire vocabulary of the quote endpoint. The
//! compatibility between them lives in [`ParameterMatrix`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod matrix;

pub use matrix::{CatalogView, ParameterMatrix, ProcessCapabilities, ProcessProfile};

/// Declares a closed set of upper-case wire tags with string conversions.
macro_rules! catalog_tags {
	(
		$(#[$meta:meta])*
		$name:ident { $($variant:ident => $tag:literal),+ $(,)? }
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum $name {
			$($variant),+
		}

		impl $name {
			/// Every known tag, in declaration order
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			/// Wire tag for this value
			pub fn as_str(&self) -> &'static str {
				match self {
					$($name::$variant => $tag),+
				}
			}
		}

		impl FromStr for $name {
			type Err = UnknownTag;

			fn from_str(value: &str) -> Result<Self, Self::Err> {
				Self::ALL
					.iter()
					.copied()
					.find(|candidate| candidate.as_str() == value)
					.ok_or_else(|| UnknownTag(value.to_string()))
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl Serialize for $name {
			fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				serializer.serialize_str(self.as_str())
			}
		}

		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				let raw = String::deserialize(deserializer)?;
				raw.parse().map_err(serde::de::Error::custom)
			}
		}
	};
}

/// A string that does not name any known catalog entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown catalog tag '{0}'")]
pub struct UnknownTag(pub String);

catalog_tags! {
	/// Manufacturing process offered by the platform
	Process {
		Cnc => "CNC",
		Sla => "3DP_SLA",
		Sls => "3DP_SLS",
		Fdm => "3DP_FDM",
		SheetMetal => "SHEET_METAL",
	}
}

catalog_tags! {
	/// Stock material. Which materials a process accepts is decided by the matrix.
	Material {
		Aluminum6061 => "ALUMINUM_6061",
		Aluminum7075 => "ALUMINUM_7075",
		Aluminum5052 => "ALUMINUM_5052",
		StainlessSteel304 => "STAINLESS_STEEL_304",
		StainlessSteel316 => "STAINLESS_STEEL_316",
		Steel1018 => "STEEL_1018",
		SteelCrs => "STEEL_CRS",
		Brass360 => "BRASS_360",
		Copper101 => "COPPER_101",
		Titanium => "TITANIUM",
		Delrin => "DELRIN",
		Peek => "PEEK",
		Abs => "ABS",
		Nylon => "NYLON",
		StandardResin => "STANDARD_RESIN",
		ToughResin => "TOUGH_RESIN",
		ClearResin => "CLEAR_RESIN",
		FlexibleResin => "FLEXIBLE_RESIN",
		HighTempResin => "HIGH_TEMP_RESIN",
		NylonPa12 => "NYLON_PA12",
		NylonPa11 => "NYLON_PA11",
		GlassFilledNylon => "GLASS_FILLED_NYLON",
		Tpu => "TPU",
		Pla => "PLA",
		Petg => "PETG",
		Asa => "ASA",
	}
}

catalog_tags! {
	/// Surface finish applied after the part is produced
	Finish {
		Standard => "STANDARD",
		Fine => "FINE",
		BeadBlasted => "BEAD_BLASTED",
		Anodized => "ANODIZED",
		PowderCoated => "POWDER_COATED",
		Polished => "POLISHED",
		Painted => "PAINTED",
		Dyed => "DYED",
		VaporSmoothed => "VAPOR_SMOOTHED",
		Sanded => "SANDED",
		Brushed => "BRUSHED",
		Plated => "PLATED",
	}
}

impl Process {
	/// Technology suffix for additive processes (`3DP_SLA` -> `SLA`), `None` otherwise
	pub fn printing_technology(&self) -> Option<&'static str> {
		self.as_str().strip_prefix("3DP_")
	}
}

/// Render a list of tags for human-readable messages
pub fn join_tags<T: fmt::Display>(tags: impl IntoIterator<Item = T>) -> String {
	tags.into_iter()
		.map(|tag| tag.to_string())
		.collect::<Vec<_>>()
		.join(", ")
}

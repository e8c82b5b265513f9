//! Process / material / finish compatibility table

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::{Finish, Material, Process};
use crate::quotes::request::{DRAWING_EXTENSIONS, MODEL_EXTENSIONS};

/// Materials and finishes accepted by one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessProfile {
	pub materials: BTreeSet<Material>,
	pub finishes: BTreeSet<Finish>,
}

impl ProcessProfile {
	pub fn new(materials: &[Material], finishes: &[Finish]) -> Self {
		Self {
			materials: materials.iter().copied().collect(),
			finishes: finishes.iter().copied().collect(),
		}
	}
}

/// Static compatibility table, read-only once built
///
/// Adding a process, material or finish is a change to [`ParameterMatrix::standard`]
/// only; validation and the capabilities endpoint read from here.
#[derive(Debug, Clone)]
pub struct ParameterMatrix {
	profiles: HashMap<Process, ProcessProfile>,
}

impl ParameterMatrix {
	/// Build a matrix from explicit profiles
	pub fn from_profiles(profiles: impl IntoIterator<Item = (Process, ProcessProfile)>) -> Self {
		Self {
			profiles: profiles.into_iter().collect(),
		}
	}

	/// The platform's production catalog
	pub fn standard() -> Self {
		use Finish as F;
		use Material as M;

		Self::from_profiles([
			(
				Process::Cnc,
				ProcessProfile::new(
					&[
						M::Aluminum6061,
						M::Aluminum7075,
						M::StainlessSteel304,
						M::StainlessSteel316,
						M::Steel1018,
						M::Brass360,
						M::Copper101,
						M::Titanium,
						M::Delrin,
						M::Peek,
						M::Abs,
						M::Nylon,
					],
					&[
						F::Standard,
						F::Fine,
						F::BeadBlasted,
						F::Anodized,
						F::PowderCoated,
						F::Polished,
					],
				),
			),
			(
				Process::Sla,
				ProcessProfile::new(
					&[
						M::StandardResin,
						M::ToughResin,
						M::ClearResin,
						M::FlexibleResin,
						M::HighTempResin,
					],
					&[F::Standard, F::Fine, F::Polished, F::Painted],
				),
			),
			(
				Process::Sls,
				ProcessProfile::new(
					&[M::NylonPa12, M::NylonPa11, M::GlassFilledNylon, M::Tpu],
					&[F::Standard, F::Dyed, F::VaporSmoothed],
				),
			),
			(
				Process::Fdm,
				ProcessProfile::new(
					&[M::Pla, M::Abs, M::Petg, M::Nylon, M::Tpu, M::Asa],
					&[F::Standard, F::Fine, F::Sanded],
				),
			),
			(
				Process::SheetMetal,
				ProcessProfile::new(
					&[
						M::Aluminum5052,
						M::Aluminum6061,
						M::StainlessSteel304,
						M::SteelCrs,
						M::Copper101,
						M::Brass360,
						M::Titanium,
					],
					&[
						F::Standard,
						F::Brushed,
						F::Anodized,
						F::PowderCoated,
						F::Plated,
					],
				),
			),
		])
	}

	/// Processes with a profile, in catalog order
	pub fn processes(&self) -> Vec<Process> {
		Process::ALL
			.iter()
			.copied()
			.filter(|process| self.profiles.contains_key(process))
			.collect()
	}

	pub fn profile(&self, process: Process) -> Option<&ProcessProfile> {
		self.profiles.get(&process)
	}

	/// Materials valid for `process`, empty when the process is not offered
	pub fn materials(&self, process: Process) -> Vec<Material> {
		self.profile(process)
			.map(|profile| profile.materials.iter().copied().collect())
			.unwrap_or_default()
	}

	/// Finishes valid for `process`, empty when the process is not offered
	pub fn finishes(&self, process: Process) -> Vec<Finish> {
		self.profile(process)
			.map(|profile| profile.finishes.iter().copied().collect())
			.unwrap_or_default()
	}

	pub fn supports_process(&self, process: Process) -> bool {
		self.profiles.contains_key(&process)
	}

	pub fn supports_material(&self, process: Process, material: Material) -> bool {
		self.profile(process)
			.is_some_and(|profile| profile.materials.contains(&material))
	}

	pub fn supports_finish(&self, process: Process, finish: Finish) -> bool {
		self.profile(process)
			.is_some_and(|profile| profile.finishes.contains(&finish))
	}

	/// Serializable view for the capabilities endpoint
	pub fn catalog(&self) -> CatalogView {
		CatalogView {
			processes: self
				.processes()
				.into_iter()
				.map(|process| ProcessCapabilities {
					process: process.as_str().to_string(),
					materials: self
						.materials(process)
						.iter()
						.map(|m| m.as_str().to_string())
						.collect(),
					finishes: self
						.finishes(process)
						.iter()
						.map(|f| f.as_str().to_string())
						.collect(),
				})
				.collect(),
			model_formats: MODEL_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
			drawing_formats: DRAWING_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
		}
	}
}

impl Default for ParameterMatrix {
	fn default() -> Self {
		Self::standard()
	}
}

/// Catalog listing returned by GET /api/v1/capabilities
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
	pub processes: Vec<ProcessCapabilities>,
	pub model_formats: Vec<String>,
	pub drawing_formats: Vec<String>,
}

/// One process entry of the catalog listing
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProcessCapabilities {
	pub process: String,
	pub materials: Vec<String>,
	pub finishes: Vec<String>,
}

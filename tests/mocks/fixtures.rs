//! Multipart request fixtures

use dfm_types::test_utils::SAMPLE_STL;
use reqwest::multipart::{Form, Part};

/// Builder for a quote upload
#[derive(Debug, Clone)]
pub struct QuoteForm {
	fields: Vec<(&'static str, String)>,
	model: Option<(&'static str, String, Vec<u8>)>,
	drawing: Option<(String, Vec<u8>)>,
}

#[allow(dead_code)]
impl QuoteForm {
	/// Form with only the selection fields
	pub fn new(process: &str, material: &str, finish: &str) -> Self {
		Self {
			fields: vec![
				("process", process.to_string()),
				("material", material.to_string()),
				("finish", finish.to_string()),
			],
			model: None,
			drawing: None,
		}
	}

	/// CNC / ALUMINUM_6061 / STANDARD with an STL model
	pub fn cnc_aluminum() -> Self {
		Self::new("CNC", "ALUMINUM_6061", "STANDARD").model("bracket.stl", SAMPLE_STL.to_vec())
	}

	pub fn model(self, filename: &str, content: Vec<u8>) -> Self {
		self.model_as("modelFile", filename, content)
	}

	/// Attach the model under a specific field name
	pub fn model_as(mut self, field: &'static str, filename: &str, content: Vec<u8>) -> Self {
		self.model = Some((field, filename.to_string(), content));
		self
	}

	pub fn drawing(mut self, filename: &str, content: Vec<u8>) -> Self {
		self.drawing = Some((filename.to_string(), content));
		self
	}

	pub fn into_form(self) -> Form {
		let mut form = Form::new();
		for (name, value) in self.fields {
			form = form.text(name, value);
		}
		if let Some((field, filename, content)) = self.model {
			form = form.part(field, Part::bytes(content).file_name(filename));
		}
		if let Some((filename, content)) = self.drawing {
			form = form.part("drawingFile", Part::bytes(content).file_name(filename));
		}
		form
	}
}

#[path = "engravers/document_output.rs"]
mod document_output;
#[path = "engravers/properties.rs"]
mod properties;
#[path = "engravers/raster_files.rs"]
mod raster_files;

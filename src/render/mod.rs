pub(crate) mod overlay;
pub(crate) mod raster;

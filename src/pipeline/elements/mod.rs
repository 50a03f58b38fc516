//! Built-in element implementations.

pub mod cartesian_product;
pub mod histogram_imager;
pub mod input;
pub mod iterative;
pub mod matrix_multiply;
pub mod pixel_renderer;

pub use cartesian_product::CartesianProductElement;
pub use histogram_imager::HistogramImagerElement;
pub use input::InputElement;
pub use iterative::IterativeElement;
pub use matrix_multiply::MatrixMultiplyElement;
pub use pixel_renderer::PixelRendererElement;

mod bullet_points;
mod table;

pub use bullet_points::{BulletPointPrinter, LineWriter, StdoutLineWriter};
pub use table::Table;

#[cfg(test)]
pub use bullet_points::CapturingLineWriter;

mod product;

pub use product::{NewProductRecord, Product, ProductChanges, ProductRecord};

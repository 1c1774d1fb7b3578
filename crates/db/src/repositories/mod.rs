pub mod gallery_repo;

pub use gallery_repo::GalleryRepo;

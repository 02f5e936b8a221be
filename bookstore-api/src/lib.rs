//! Bookstore API definitions.
//!
//! This crate holds the protobuf contract of the bookstore service and the
//! domain side of it:
//!
//! - Generated prost messages and tonic server traits
//! - Domain models for books and reviews, and request parsing
//! - `google.protobuf.Timestamp`, owned by this crate, and its conversions to
//!   `time` values
//!
//! # Features
//!
//! - `server`: Enables the generated gRPC server traits
//! - `codegen`: Regenerates `src/proto` from `proto/bookstore.proto` at build time

pub mod codec;
pub mod model;

#[allow(
    unused_qualifications,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::clone_on_ref_ptr,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_html_tags
)]
pub mod proto {
    pub mod bookstore {
        include!("proto/bookstore.rs");
    }

    pub mod google {
        pub mod protobuf {
            include!("proto/google.protobuf.rs");
        }
    }

    pub use bookstore::*;
    pub use google::protobuf::Timestamp;
}

//! Test modules for ubxmesh-io
//!
//! Exports of whole scenes, checked through the written document.

//! Service tests for mathserver
//!
//! Behaviour tests for every history store backend.

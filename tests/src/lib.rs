//! End-to-end runs of the enumeration pipeline against in-process fakes.

#[cfg(test)]
mod pipeline;

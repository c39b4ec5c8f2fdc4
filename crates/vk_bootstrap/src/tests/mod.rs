//! End-to-end lifecycle scenarios against the recording fakes

pub(crate) mod dotabuff;

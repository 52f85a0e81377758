mod tests_generate;
mod tests_properties;

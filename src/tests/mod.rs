#[cfg(test)]
mod ordered;

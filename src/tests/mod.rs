mod sha512;
mod vectors;

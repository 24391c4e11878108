use super::*;

impl BrikConfig {
    /// Get a typed value using dot notation.
    ///
    /// # Examples
    /// ```no_run
    /// # use brik::BrikConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = BrikConfig::from_file("tetris.brik")?;
    /// let lives: u32 = config.get("reglas.vidas_iniciales")?;
    /// let tick: f64 = config.get("reglas.tick_base")?;
    /// let board: Vec<u32> = config.get("parametros_generales.tablero")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if the path doesn't exist or the value can't be
    /// converted to `T`.
    pub fn get<T>(&self, path: &str) -> Result<T, BrikError>
    where
        T: TryFrom<Value, Error = BrikError>,
    {
        let value = self.get_value(path)?.clone();
        T::try_from(value).map_err(|e| with_path(e, path))
    }

    /// Like [`get`](Self::get), but a missing path yields `Ok(None)`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, BrikError>
    where
        T: TryFrom<Value, Error = BrikError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(BrikError::PathError { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use brik::BrikConfig;
    /// # let config = BrikConfig::from_file("snake.brik").unwrap();
    /// let lives = config.get_or("reglas.vidas_iniciales", 1i64);
    /// let ghost = config.get_or("reglas.ghost_piece", false);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = BrikError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Raw value at a dotted path, found by descending one block per segment.
    pub fn get_value(&self, path: &str) -> Result<&Value, BrikError> {
        self.document.lookup(path).ok_or_else(|| BrikError::PathError {
            path: path.to_string(),
            hint: Some("Check that every segment names a key of the enclosing block".into()),
            code: Some(304),
        })
    }

    /// A top-level block by name.
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.document.get(name).and_then(Value::as_block)
    }

    /// Ordinary keys of the block at `path`, in declaration order.
    pub fn keys(&self, path: &str) -> Result<Vec<String>, BrikError> {
        let block = self.block_at(path)?;
        Ok(block.entries.keys().cloned().collect())
    }

    /// `->` entries of the block at `path`, in declaration order.
    pub fn relations(&self, path: &str) -> Result<&[Relation], BrikError> {
        Ok(&self.block_at(path)?.relations)
    }

    pub fn has(&self, path: &str) -> bool {
        self.document.lookup(path).is_some()
    }

    fn block_at(&self, path: &str) -> Result<&Block, BrikError> {
        let value = self.get_value(path)?;
        value.as_block().ok_or_else(|| {
            BrikError::type_error(
                format!("Path '{}' is a {}, not a block", path, value.kind()),
                Some("Only blocks have keys and relations"),
                408,
            )
        })
    }
}

fn with_path(e: BrikError, path: &str) -> BrikError {
    match e {
        BrikError::TypeError { message, hint, code } => BrikError::TypeError {
            message: format!("{} at '{}'", message, path),
            hint,
            code,
        },
        other => other,
    }
}

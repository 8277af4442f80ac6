//! Integer object properties.
//!
//! Every category stores named integer properties in variables
//! `<prefix>1`, `<prefix>2`, … with the name in a text attribute. Property 1
//! is always the id table itself (named `"ID"`).

use super::Session;
use super::lookup::IdLookup;
use crate::exodus_error::ExodusError;
use crate::names::ATT_PROP_NAME;
use crate::object_type::ObjectType;
use crate::storage::{FileHandle, Storage, VarId};

impl<S: Storage> Session<S> {
    /// Number of property variables defined for `object`.
    pub fn num_props(&self, file: FileHandle, object: ObjectType) -> Result<usize, ExodusError> {
        if !has_properties(object) {
            return Err(ExodusError::BadParam(format!(
                "object type {object} not supported; file id {file}"
            )));
        }
        let mut count = 0;
        while self.prop_var(file, object, count + 1)?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Value of property `name` for the object with id `id`.
    ///
    /// Returns `Ok(None)` (and logs a warning) when the object is null.
    pub fn get_prop(
        &mut self,
        file: FileHandle,
        object: ObjectType,
        id: i32,
        name: &str,
    ) -> Result<Option<i32>, ExodusError> {
        let num_props = self.num_props(file, object)?;
        let mut found = None;
        for n in 1..=num_props {
            let Some(var) = self.prop_var(file, object, n)? else {
                break;
            };
            let prop_name = self
                .storage
                .text_attribute(file, var, ATT_PROP_NAME)
                .map_err(|e| ExodusError::io(file, "failed to get property name", e))?;
            if prop_name == name {
                found = Some(var);
                break;
            }
        }
        let Some(var) = found else {
            return Err(ExodusError::PropertyNotFound {
                file,
                object,
                name: name.to_string(),
            });
        };

        match self.lookup_object(file, object, id)? {
            IdLookup::Null(_) => {
                log::warn!("{object} id {id} is NULL in file id {file}");
                Ok(None)
            }
            found @ IdLookup::Found(_) => {
                let value = self
                    .storage
                    .read_int(file, var, found.offset())
                    .map_err(|e| {
                        ExodusError::io(
                            file,
                            format!("failed to read value in {object} property array"),
                            e,
                        )
                    })?;
                Ok(Some(value))
            }
        }
    }

    /// Variable of the `n`-th property, or `None` past the last one.
    fn prop_var(
        &self,
        file: FileHandle,
        object: ObjectType,
        n: usize,
    ) -> Result<Option<VarId>, ExodusError> {
        let Some(name) = object.prop_var(n) else {
            return Ok(None);
        };
        match self.storage.variable(file, &name) {
            Ok(var) => Ok(Some(var)),
            Err(e) if e.is_undefined() => Ok(None),
            Err(e) => Err(ExodusError::io(file, format!("failed to locate `{name}`"), e)),
        }
    }
}

/// Edge and face maps have an id table but no property list.
fn has_properties(object: ObjectType) -> bool {
    object.prop_prefix().is_some()
        && !matches!(object, ObjectType::EdgeMap | ObjectType::FaceMap)
}

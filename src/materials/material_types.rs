//! Stress models and the material list particles index into

use indexmap::IndexMap;

use crate::core::Particle;
use crate::error::{MpmError, Result};
use crate::math::zero_matrix;

/// Per-particle stress update.
///
/// Implementations read the particle's deformation history and overwrite
/// `particle.stress` with the Cauchy stress.
pub trait StressModel: Send + Sync {
    fn calculate_stress(&self, particle: &mut Particle);

    fn name(&self) -> &str;
}

/// Material that never develops stress (free-flying dust).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStress;

impl StressModel for NoStress {
    fn calculate_stress(&self, particle: &mut Particle) {
        particle.stress = zero_matrix();
    }

    fn name(&self) -> &str {
        "no-stress"
    }
}

/// Ordered material list. A particle's `material_id` is its insertion index.
#[derive(Default)]
pub struct MaterialLibrary {
    models: IndexMap<String, Box<dyn StressModel>>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under a unique name and return its material id.
    pub fn insert(&mut self, name: impl Into<String>, model: Box<dyn StressModel>) -> Result<usize> {
        let name = name.into();
        if self.models.contains_key(&name) {
            return Err(MpmError::InvalidMaterial(format!(
                "material '{name}' registered twice"
            )));
        }
        let (id, _) = self.models.insert_full(name, model);
        Ok(id)
    }

    /// Builder form of [`insert`](Self::insert) that keeps the model's own name.
    pub fn with(mut self, model: impl StressModel + 'static) -> Result<Self> {
        let name = model.name().to_string();
        self.insert(name, Box::new(model))?;
        Ok(self)
    }

    pub fn get(&self, material_id: usize) -> Option<&dyn StressModel> {
        self.models.get_index(material_id).map(|(_, model)| model.as_ref())
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.models.get_index_of(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<Box<dyn StressModel>> for MaterialLibrary {
    /// Models keyed by position, so a duplicate name never collides.
    fn from_iter<I: IntoIterator<Item = Box<dyn StressModel>>>(iter: I) -> Self {
        let models = iter
            .into_iter()
            .enumerate()
            .map(|(id, model)| (format!("{}#{id}", model.name()), model))
            .collect();
        Self { models }
    }
}

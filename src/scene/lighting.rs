//! Light sources pushed to the scene shader.

use glam::Vec3;

use crate::abs::UniformSink;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub position: Vec3,
}

impl DirectionalLight {
    pub fn apply(&self, shader: &dyn UniformSink) {
        shader.set_uniform_value("directionalLight.direction", self.direction.into());
        shader.set_uniform_value("directionalLight.ambient", self.ambient.into());
        shader.set_uniform_value("directionalLight.diffuse", self.diffuse.into());
        shader.set_uniform_value("directionalLight.specular", self.specular.into());
        shader.set_uniform_value("directionalLight.position", self.position.into());
    }
}

/// A point light whose contribution falls off as `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl PointLight {
    pub fn apply(&self, shader: &dyn UniformSink) {
        shader.set_uniform_value("pointLight.position", self.position.into());
        shader.set_uniform_value("pointLight.ambient", self.ambient.into());
        shader.set_uniform_value("pointLight.diffuse", self.diffuse.into());
        shader.set_uniform_value("pointLight.specular", self.specular.into());
        shader.set_uniform_value("pointLight.constant", self.constant.into());
        shader.set_uniform_value("pointLight.linear", self.linear.into());
        shader.set_uniform_value("pointLight.quadratic", self.quadratic.into());
    }

    /// Attenuation factor at distance `d` from the light.
    pub fn attenuation(&self, d: f32) -> f32 {
        1.0 / (self.constant + self.linear * d + self.quadratic * d * d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attenuation_is_one_at_source_and_falls_off() {
        let light = PointLight {
            position: Vec3::ZERO,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        };
        assert_eq!(light.attenuation(0.0), 1.0);
        assert!(light.attenuation(10.0) < light.attenuation(5.0));
        assert!((light.attenuation(10.0) - 1.0 / 5.1).abs() < 1e-5);
    }
}

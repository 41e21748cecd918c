use crate::clock::FrameTime;
use crate::config::{ConfigError, ResolverParams};
use crate::school::{School, SchoolReport, Spawner};
use crate::target::TargetResolver;

/// Resolver plus school, advanced together once per frame.
pub struct Aquarium {
    resolver: TargetResolver,
    school: School,
}

impl Aquarium {
    pub fn new(
        params: ResolverParams,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            resolver: TargetResolver::new(params, width, height)?,
            school: School::new(seed),
        })
    }

    pub fn resolver(&self) -> &TargetResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut TargetResolver {
        &mut self.resolver
    }

    pub fn school(&self) -> &School {
        &self.school
    }

    pub fn spawner(&self) -> Spawner {
        self.school.spawner()
    }

    /// Resolve the target first, then move every fish against that snapshot.
    pub fn frame(&mut self, time: FrameTime) -> SchoolReport {
        self.resolver.tick(time.delta_ms);
        let target = self.resolver.state();
        self.school.tick(&target, time)
    }
}

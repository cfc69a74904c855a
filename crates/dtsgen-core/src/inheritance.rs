//! Class graph: base class linking and overload propagation.
//!
//! Classes live in an arena indexed by `ClassId`. A class stores its base
//! class id and the ids of its direct subclasses; `set_baseclass` keeps both
//! directions in sync.
//!
//! Propagation walks every root top-down. Each subclass is compared against
//! its base's final method list, so methods inherited from further up the
//! chain arrive through the intermediate classes.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::class::{ClassId, ClassModel};
use crate::method::{MethodRef, OverloadDecision};
use crate::observer::{PipelineEvent, PipelineObserver};
use crate::type_resolver::TypeResolver;

/// Base class references loop back on themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inheritance cycle: {}", .classes.join(" -> "))]
pub struct InheritanceCycle {
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedBase {
    pub class: String,
    pub extends: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSummary {
    pub linked: usize,
    pub unresolved: Vec<UnresolvedBase>,
}

#[derive(Debug, Default)]
pub struct ClassGraph {
    classes: Vec<ClassModel>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnPath,
    Done,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> ClassId {
        ClassId(self.classes.len() as u32)
    }

    /// Add a model built with `next_id()`.
    pub fn push(&mut self, model: ClassModel) -> ClassId {
        debug_assert_eq!(model.id, self.next_id());
        let id = model.id;
        self.classes.push(model);
        id
    }

    pub fn get(&self, id: ClassId) -> &ClassModel {
        &self.classes[id.index()]
    }

    pub fn get_mut(&mut self, id: ClassId) -> &mut ClassModel {
        &mut self.classes[id.index()]
    }

    pub fn find(&self, qualified_name: &str) -> Option<&ClassModel> {
        self.classes
            .iter()
            .find(|class| class.qualified_name == qualified_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn base_of(&self, id: ClassId) -> Option<&ClassModel> {
        self.get(id).baseclass.map(|base| self.get(base))
    }

    /// Link `child` under `base`, detaching it from a previous base first.
    pub fn set_baseclass(&mut self, child: ClassId, base: ClassId) {
        if let Some(previous) = self.classes[child.index()].baseclass {
            self.classes[previous.index()]
                .child_classes
                .retain(|id| *id != child);
        }
        self.classes[child.index()].baseclass = Some(base);
        let children = &mut self.classes[base.index()].child_classes;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    /// Resolve every `extends` reference against the class module paths.
    ///
    /// `sap.m.Button` matches the class whose module path is `sap/m/Button`.
    /// When several classes share a path the last one wins.
    pub fn link_base_classes(&mut self, observer: &dyn PipelineObserver) -> LinkSummary {
        let mut by_path: FxHashMap<String, ClassId> = FxHashMap::default();
        for class in &self.classes {
            by_path.insert(class.full_name.clone(), class.id);
        }

        let mut summary = LinkSummary::default();
        for index in 0..self.classes.len() {
            let child = ClassId(index as u32);
            let Some(extends) = self.classes[index].extends.clone() else {
                continue;
            };
            match by_path.get(&extends.replace('.', "/")) {
                Some(&base) => {
                    trace!(
                        class = %self.classes[index].qualified_name,
                        %extends,
                        "linked base class"
                    );
                    self.set_baseclass(child, base);
                    summary.linked += 1;
                }
                None => {
                    let class = self.classes[index].qualified_name.clone();
                    observer.on_event(&PipelineEvent::BaseClassUnresolved {
                        class: class.clone(),
                        extends: extends.clone(),
                    });
                    summary.unresolved.push(UnresolvedBase { class, extends });
                }
            }
        }
        summary
    }

    pub fn check_acyclic(&self) -> Result<(), InheritanceCycle> {
        let mut state = vec![VisitState::Unvisited; self.classes.len()];

        for start in 0..self.classes.len() {
            let mut path: Vec<usize> = Vec::new();
            let mut current = Some(start);
            while let Some(index) = current {
                match state[index] {
                    VisitState::Done => break,
                    VisitState::OnPath => {
                        let begin = path.iter().position(|&i| i == index).unwrap_or(0);
                        let mut classes: Vec<String> = path[begin..]
                            .iter()
                            .map(|&i| self.classes[i].qualified_name.clone())
                            .collect();
                        classes.push(self.classes[index].qualified_name.clone());
                        return Err(InheritanceCycle { classes });
                    }
                    VisitState::Unvisited => {
                        state[index] = VisitState::OnPath;
                        path.push(index);
                        current = self.classes[index].baseclass.map(ClassId::index);
                    }
                }
            }
            for index in path {
                state[index] = VisitState::Done;
            }
        }
        Ok(())
    }

    /// Classes without a linked base class.
    pub fn roots(&self) -> Vec<ClassId> {
        self.classes
            .iter()
            .filter(|class| class.baseclass.is_none())
            .map(|class| class.id)
            .collect()
    }

    /// Run overload propagation from every root. Returns the number of base
    /// methods carried into subclasses.
    pub fn propagate_overloads(
        &mut self,
        resolver: &TypeResolver<'_>,
        observer: &dyn PipelineObserver,
    ) -> usize {
        self.roots()
            .into_iter()
            .map(|root| self.push_overloads(root, resolver, observer))
            .sum()
    }

    /// Depth-first: each class is completed before its subclasses look at it.
    pub fn push_overloads(
        &mut self,
        id: ClassId,
        resolver: &TypeResolver<'_>,
        observer: &dyn PipelineObserver,
    ) -> usize {
        let mut added = self.create_overloads(id, resolver, observer);
        let children = self.classes[id.index()].child_classes.clone();
        for child in children {
            added += self.push_overloads(child, resolver, observer);
        }
        added
    }

    /// Compare `id`'s own methods with its base's methods.
    ///
    /// Every pairing is evaluated: a fluent base method makes each same-named
    /// override return `this`, and any flagged pairing copies the base method
    /// into the class and merges return types into the flagged overrides.
    pub fn create_overloads(
        &mut self,
        id: ClassId,
        resolver: &TypeResolver<'_>,
        observer: &dyn PipelineObserver,
    ) -> usize {
        let Some(base_id) = self.classes[id.index()].baseclass else {
            return 0;
        };
        let base = &self.classes[base_id.index()];
        let base_methods = base.methods.clone();
        let base_name = base.qualified_name.clone();

        let class = &mut self.classes[id.index()];
        let own_count = class.methods.len();
        let mut added = 0;

        for (index, base_method) in base_methods.iter().enumerate() {
            let origin = MethodRef {
                class: base_id,
                index,
            };
            let mut flagged = Vec::new();
            for (position, own) in class.methods[..own_count].iter_mut().enumerate() {
                match own.overload_decision(base_method) {
                    OverloadDecision::Overload => flagged.push(position),
                    OverloadDecision::AdoptThisReturn => own.adopt_this_return(),
                    OverloadDecision::Compatible | OverloadDecision::Unrelated => {}
                }
            }
            if flagged.is_empty() {
                continue;
            }

            for position in flagged {
                let needs = class.methods[position].merge_base_type(base_method, origin, resolver);
                class.absorb(needs);
            }
            class.absorb(base_method.requirements.clone());
            class.methods.push(base_method.clone());
            added += 1;

            observer.on_event(&PipelineEvent::OverloadInherited {
                class: class.qualified_name.clone(),
                base_class: base_name.clone(),
                method: base_method.name.clone(),
            });
        }

        class.methods.sort_by(|a, b| a.name.cmp(&b.name));
        if added > 0 {
            debug!(class = %class.qualified_name, added, "carried base methods into class");
        }
        added
    }
}
